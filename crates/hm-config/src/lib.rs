//! hm-config: calculation configuration and its validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{
    columns_from_table, parameters_from_table, settings_from_table, validate_columns,
    validate_parameters, validate_physical,
};

use hm_core::DataTable;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Missing parameters: {}", .names.join(", "))]
    MissingParameters { names: Vec<String> },

    #[error("Missing columns: {}", describe_missing(.unmapped, .absent))]
    MissingColumns {
        /// Standardized tokens with no mapping.
        unmapped: Vec<String>,
        /// Mapped column names not present in the data table.
        absent: Vec<String>,
    },

    #[error("Missing setting: {name}")]
    MissingSetting { name: &'static str },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate key '{key}' in {table} table")]
    DuplicateKey { key: String, table: &'static str },

    #[error("The {table} table has no '{column}' column")]
    MissingTableColumn { table: &'static str, column: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn describe_missing(unmapped: &[String], absent: &[String]) -> String {
    let mut parts = Vec::new();
    if !unmapped.is_empty() {
        parts.push(format!("unmapped variables [{}]", unmapped.join(", ")));
    }
    if !absent.is_empty() {
        parts.push(format!("not in data [{}]", absent.join(", ")));
    }
    parts.join("; ")
}

impl HydrometerConfig {
    /// Parse and validate the three configuration tables against `data`.
    ///
    /// Columns are checked first, then parameters, then settings; the first
    /// failing check is returned.
    pub fn from_tables(
        parameters: &DataTable,
        column_names: &DataTable,
        settings: &DataTable,
        data: &DataTable,
    ) -> ConfigResult<Self> {
        let columns = columns_from_table(column_names)?;
        validate_columns(&columns, data)?;
        let parameters = parameters_from_table(parameters)?;
        let settings = settings_from_table(settings)?;

        tracing::debug!(
            mapped_columns = columns.len(),
            extrapolation_handling = %settings.extrapolation_handling,
            "configuration validated"
        );

        Ok(Self {
            parameters,
            columns,
            settings,
        })
    }

    /// Re-run the checks that depend on the data table, for a configuration
    /// that was built or loaded without one.
    pub fn validate_against(&self, data: &DataTable) -> ConfigResult<()> {
        validate_physical(&self.parameters)?;
        validate_columns(&self.columns, data)
    }
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<HydrometerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: HydrometerConfig = serde_yaml::from_str(&content)?;
    validate_physical(&config.parameters)?;
    Ok(config)
}

pub fn save_yaml(path: &std::path::Path, config: &HydrometerConfig) -> ConfigResult<()> {
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
