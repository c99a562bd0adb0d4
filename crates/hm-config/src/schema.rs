//! Configuration schema definitions.

use std::collections::BTreeMap;
use std::fmt;

use hm_core::SampleTime;
use serde::{Deserialize, Serialize};

/// Names every parameter table must define.
pub const REQUIRED_PARAMETERS: [&str; 6] = ["mu", "rho_l", "rho_s", "g", "L0", "k"];

/// Physical and calibration constants shared by every sample row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ParameterSet {
    /// Dynamic viscosity of the suspending liquid.
    pub mu: f64,
    /// Liquid density.
    pub rho_l: f64,
    /// Particle (solid) density.
    pub rho_s: f64,
    /// Gravitational acceleration.
    pub g: f64,
    /// Effective depth at a zero reading.
    #[serde(rename = "L0")]
    pub l0: f64,
    /// Change in effective depth per unit of hydrometer reading.
    pub k: f64,
}

/// Standardized variable the pipeline reads from the data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Temperature(SampleTime),
    Reading(SampleTime),
    Blank(SampleTime),
    Calibration,
}

impl Variable {
    /// Every variable the pipeline needs, in a stable order.
    pub fn required() -> Vec<Variable> {
        let mut vars = Vec::with_capacity(13);
        for t in SampleTime::ALL {
            vars.push(Variable::Temperature(t));
            vars.push(Variable::Reading(t));
            vars.push(Variable::Blank(t));
        }
        vars.push(Variable::Calibration);
        vars
    }

    /// Token used in the column-mapping table, e.g. `T30_temp`, `R_b_60`.
    pub fn token(self) -> String {
        match self {
            Variable::Temperature(t) => format!("T{}_temp", t.label()),
            Variable::Reading(t) => format!("R_{}", t.label()),
            Variable::Blank(t) => format!("R_b_{}", t.label()),
            Variable::Calibration => "C".to_string(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Standardized token -> literal column name in the caller's data table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ColumnMap(BTreeMap<String, String>);

impl ColumnMap {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self(entries)
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    pub fn lookup(&self, variable: Variable) -> Option<&str> {
        self.get(&variable.token())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the interpolator does when a target diameter lies outside the
/// observed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtrapolationHandling {
    /// Use the percent finer of the nearest boundary sample.
    Truncate,
    /// Project the log-linear line through the two nearest samples.
    Extrapolate,
    /// Any other configured value; out-of-range targets yield `NaN`.
    Unrecognized(String),
}

impl ExtrapolationHandling {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Truncate => "truncate",
            Self::Extrapolate => "extrapolate",
            Self::Unrecognized(other) => other,
        }
    }
}

impl From<String> for ExtrapolationHandling {
    fn from(value: String) -> Self {
        match value.trim() {
            "truncate" => Self::Truncate,
            "extrapolate" => Self::Extrapolate,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<ExtrapolationHandling> for String {
    fn from(value: ExtrapolationHandling) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ExtrapolationHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const EXTRAPOLATION_HANDLING: &str = "extrapolation_handling";

/// Calculation settings. Settings this crate does not interpret are kept in
/// `other` so a saved configuration round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalcSettings {
    pub extrapolation_handling: ExtrapolationHandling,
    #[serde(flatten, default)]
    pub other: BTreeMap<String, String>,
}

impl CalcSettings {
    pub fn new(extrapolation_handling: ExtrapolationHandling) -> Self {
        Self {
            extrapolation_handling,
            other: BTreeMap::new(),
        }
    }
}

/// Fully validated configuration for one calculation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydrometerConfig {
    pub parameters: ParameterSet,
    pub columns: ColumnMap,
    pub settings: CalcSettings,
}
