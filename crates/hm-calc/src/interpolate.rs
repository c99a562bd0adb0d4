//! Percent finer at an arbitrary diameter by log-linear interpolation
//! between the four sampled (diameter, percent finer) points.

use hm_config::ExtrapolationHandling;
use hm_core::{PerTime, SampleTime};

use crate::pipeline::TimeDerived;

pub const INTERPOLATION_FAILED: &str = "Interpolation failed";

/// One sampled point of the particle-size distribution curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiameterPoint {
    pub time: SampleTime,
    pub diameter: f64,
    pub percent_finer: f64,
}

impl DiameterPoint {
    pub fn from_derived(derived: &PerTime<TimeDerived>) -> PerTime<DiameterPoint> {
        PerTime::from_fn(|time| DiameterPoint {
            time,
            diameter: derived[time].diameter,
            percent_finer: derived[time].percent_finer,
        })
    }
}

/// How an interpolated value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Target lies between the diameters sampled at these two times.
    Bracketed { lower: SampleTime, upper: SampleTime },
    /// Target outside the sampled range; nearest boundary value used.
    Truncated { boundary: SampleTime },
    /// Target outside the sampled range; line through two boundary samples.
    Extrapolated { first: SampleTime, second: SampleTime },
    /// No value could be produced.
    Failed,
}

impl Method {
    /// True when the value needed boundary handling or is missing.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Method::Bracketed { .. })
    }
}

/// Interpolated percent finer with its accompanying warning text.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolated {
    pub value: f64,
    pub warning: String,
    pub method: Method,
}

impl Interpolated {
    fn failed() -> Self {
        Self {
            value: f64::NAN,
            warning: INTERPOLATION_FAILED.to_string(),
            method: Method::Failed,
        }
    }
}

/// Percent finer at `target` diameter.
///
/// Points are sorted by diameter; a target inside `[X_i, X_i+1]` is
/// interpolated on `ln(X)`. Outside the sampled range `handling` decides
/// between the boundary value, a log-linear projection, or `NaN`.
pub fn interpolate_percent_finer(
    points: &PerTime<DiameterPoint>,
    target: f64,
    handling: &ExtrapolationHandling,
) -> Interpolated {
    if !(target.is_finite() && target > 0.0) {
        return Interpolated::failed();
    }

    let mut sorted = *points.values();
    sorted.sort_by(|a, b| a.diameter.total_cmp(&b.diameter));
    let size = describe_diameter(target);

    for pair in sorted.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if lo.diameter <= target && target <= hi.diameter {
            let value = if lo.diameter == hi.diameter || target == lo.diameter {
                lo.percent_finer
            } else if target == hi.diameter {
                hi.percent_finer
            } else {
                log_linear(lo, hi, target)
            };
            tracing::debug!(diameter = target, lower = %lo.time, upper = %hi.time, value, "bracketed");
            return Interpolated {
                value,
                warning: format!(
                    "Used data from times {} and {} to interpolate {size}",
                    lo.time, hi.time
                ),
                method: Method::Bracketed {
                    lower: lo.time,
                    upper: hi.time,
                },
            };
        }
    }

    let [first, second, .., penultimate, last] = sorted;
    let below = target < first.diameter;
    let above = target > last.diameter;

    let result = match handling {
        ExtrapolationHandling::Truncate if below => Interpolated {
            value: first.percent_finer,
            warning: format!(
                "{size} is smaller than all X values; used P for smallest X (time {})",
                first.time
            ),
            method: Method::Truncated {
                boundary: first.time,
            },
        },
        ExtrapolationHandling::Truncate if above => Interpolated {
            value: last.percent_finer,
            warning: format!(
                "{size} is larger than all X values; used P for largest X (time {})",
                last.time
            ),
            method: Method::Truncated {
                boundary: last.time,
            },
        },
        ExtrapolationHandling::Extrapolate if below => {
            extrapolated(first, second, target, format!("{size} is smaller"), &size)
        }
        ExtrapolationHandling::Extrapolate if above => {
            extrapolated(penultimate, last, target, format!("{size} is larger"), &size)
        }
        _ => Interpolated::failed(),
    };

    tracing::debug!(diameter = target, method = ?result.method, value = result.value, "outside sampled range");
    result
}

fn extrapolated(
    a: DiameterPoint,
    b: DiameterPoint,
    target: f64,
    lead: String,
    size: &str,
) -> Interpolated {
    let value = if a.diameter == b.diameter {
        a.percent_finer
    } else {
        log_linear(a, b, target)
    };
    Interpolated {
        value,
        warning: format!(
            "{lead} than all X values; used data from times {} and {} to extrapolate {size}",
            a.time, b.time
        ),
        method: Method::Extrapolated {
            first: a.time,
            second: b.time,
        },
    }
}

fn log_linear(a: DiameterPoint, b: DiameterPoint, target: f64) -> f64 {
    let (ln_a, ln_b) = (a.diameter.ln(), b.diameter.ln());
    a.percent_finer + (b.percent_finer - a.percent_finer) * (target.ln() - ln_a) / (ln_b - ln_a)
}

/// Diameter in micrometres for messages, assuming centimetre inputs.
fn describe_diameter(diameter_cm: f64) -> String {
    let um = (diameter_cm * 1e4 * 1e6).round() / 1e6;
    format!("{um}um")
}
