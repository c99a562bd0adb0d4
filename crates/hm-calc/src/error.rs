//! Error types for the calculation pipeline.

use hm_config::ConfigError;
use hm_core::{CoreError, SampleTime};
use thiserror::Error;

/// A standardized variable name that cannot be turned into a data column.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("'{name}' not found in column mapping")]
    Unmapped { name: String },

    #[error("Column '{column}' (mapped from '{name}') not found in data")]
    MissingColumn { name: String, column: String },
}

/// A single formula failing for one value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("column '{column}' has non-numeric value '{value}'")]
    NotNumeric { column: String, value: String },

    #[error("effective depth {value} is not positive")]
    NonPositiveDepth { value: f64 },

    #[error("g * (rho_s - rho_l) * t = {value} is not positive")]
    NonPositiveSettling { value: f64 },

    #[error("calibration constant is zero")]
    ZeroCalibration,

    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Calculation error in row {row}{}: {source}", describe_time(.time))]
    Calculation {
        row: usize,
        time: Option<SampleTime>,
        source: FormulaError,
    },

    #[error("Table error: {0}")]
    Table(#[from] CoreError),
}

fn describe_time(time: &Option<SampleTime>) -> String {
    match time {
        Some(t) => format!(" at {} s", t.label()),
        None => String::new(),
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
