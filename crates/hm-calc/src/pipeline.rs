//! Per-time formula chain: temperature correction, corrected reading,
//! effective depth, equivalent particle diameter and percent finer.
//!
//! Formulas follow the hydrometer method of Gee & Bauder. Lengths are in
//! whatever unit `L0`, `k`, `mu` and `g` share (centimetres for the usual
//! CGS parameter set); times are plain seconds.

use hm_config::ParameterSet;
use hm_core::{Column, PerTime, SampleTime, ensure_finite};

use crate::error::{CalcError, CalcResult, FormulaError};
use crate::resolve::RawColumns;

/// Hydrometer reading change per degree away from the reference temperature.
pub const TEMPERATURE_COEFFICIENT: f64 = 0.36;
pub const REFERENCE_TEMPERATURE: f64 = 20.0;

/// Raw measurements for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub temperature: PerTime<f64>,
    pub reading: PerTime<f64>,
    pub blank: PerTime<f64>,
    /// Calibration constant `C` (oven-dry sample mass for the usual setup).
    pub calibration: f64,
}

/// Quantities derived at one sampling time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeDerived {
    pub temperature_correction: f64,
    pub corrected_reading: f64,
    pub effective_depth: f64,
    pub diameter: f64,
    pub percent_finer: f64,
}

pub fn temperature_correction(temperature: f64) -> f64 {
    TEMPERATURE_COEFFICIENT * (temperature - REFERENCE_TEMPERATURE)
}

pub fn corrected_reading(reading: f64, correction: f64, blank: f64) -> f64 {
    reading + correction - blank
}

/// Effective depth. Uses the uncorrected reading.
pub fn effective_depth(params: &ParameterSet, reading: f64) -> f64 {
    params.l0 - params.k * reading
}

/// Equivalent particle diameter from Stokes' law.
pub fn particle_diameter(
    params: &ParameterSet,
    effective_depth: f64,
    seconds: f64,
) -> Result<f64, FormulaError> {
    if effective_depth.is_nan() || effective_depth <= 0.0 {
        return Err(FormulaError::NonPositiveDepth {
            value: effective_depth,
        });
    }
    let settling = params.g * (params.rho_s - params.rho_l) * seconds;
    if settling.is_nan() || settling <= 0.0 {
        return Err(FormulaError::NonPositiveSettling { value: settling });
    }
    let diameter = ((18.0 * params.mu * effective_depth) / settling).sqrt();
    finite(diameter, "particle diameter")
}

/// Percent of the sample finer than the diameter at this time. Uses the
/// corrected reading.
pub fn percent_finer(corrected_reading: f64, calibration: f64) -> Result<f64, FormulaError> {
    if calibration == 0.0 {
        return Err(FormulaError::ZeroCalibration);
    }
    finite(corrected_reading / calibration * 100.0, "percent finer")
}

fn finite(value: f64, what: &'static str) -> Result<f64, FormulaError> {
    ensure_finite(value, what).map_err(|_| FormulaError::NonFinite { what, value })
}

/// Run the formula chain for one sampling time.
pub fn derive_time(
    params: &ParameterSet,
    raw: &RawSample,
    time: SampleTime,
) -> Result<TimeDerived, FormulaError> {
    let reading = raw.reading[time];
    let correction = temperature_correction(raw.temperature[time]);
    let corrected = corrected_reading(reading, correction, raw.blank[time]);
    let depth = effective_depth(params, reading);
    let diameter = particle_diameter(params, depth, time.seconds())?;
    let percent = percent_finer(corrected, raw.calibration)?;

    Ok(TimeDerived {
        temperature_correction: correction,
        corrected_reading: corrected,
        effective_depth: depth,
        diameter,
        percent_finer: percent,
    })
}

/// Run the formula chain for all four sampling times of row `row`.
pub fn derive_sample(
    params: &ParameterSet,
    raw: &RawSample,
    row: usize,
) -> CalcResult<PerTime<TimeDerived>> {
    PerTime::try_from_fn(|time| {
        derive_time(params, raw, time).map_err(|source| CalcError::Calculation {
            row,
            time: Some(time),
            source,
        })
    })
}

/// Parse the raw inputs of row `row` from the resolved columns.
pub fn read_raw_sample(columns: &RawColumns<'_>, row: usize) -> CalcResult<RawSample> {
    let cell = |column: &Column<'_>, time: Option<SampleTime>| -> CalcResult<f64> {
        column.real(row).ok_or_else(|| CalcError::Calculation {
            row,
            time,
            source: FormulaError::NotNumeric {
                column: column.name().to_string(),
                value: column.get(row).unwrap_or_default().to_string(),
            },
        })
    };

    Ok(RawSample {
        temperature: PerTime::try_from_fn(|t| cell(&columns.temperature[t], Some(t)))?,
        reading: PerTime::try_from_fn(|t| cell(&columns.reading[t], Some(t)))?,
        blank: PerTime::try_from_fn(|t| cell(&columns.blank[t], Some(t)))?,
        calibration: cell(&columns.calibration, None)?,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn diameter_positive_for_positive_depth(
            depth in 1e-6_f64..50.0,
            mu in 1e-4_f64..1.0,
            rho_l in 0.5_f64..1.5,
            excess in 0.01_f64..5.0,
            idx in 0usize..4,
        ) {
            let p = ParameterSet { mu, rho_l, rho_s: rho_l + excess, g: 980.7, l0: 16.3, k: 0.164 };
            let t = SampleTime::ALL[idx];
            let x = particle_diameter(&p, depth, t.seconds()).unwrap();
            prop_assert!(x > 0.0);
        }
    }
}
