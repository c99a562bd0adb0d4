//! Configuration table parsing and validation.
//!
//! Every check here runs before any sample row is touched, so a bad
//! configuration never produces partial results.

use std::collections::{BTreeMap, BTreeSet};

use hm_core::{DataTable, parse_real};

use crate::schema::{
    CalcSettings, ColumnMap, EXTRAPOLATION_HANDLING, ExtrapolationHandling, ParameterSet,
    REQUIRED_PARAMETERS, Variable,
};
use crate::{ConfigError, ConfigResult};

pub const PARAMETER_KEY: &str = "Parameter";
pub const PARAMETER_VALUE: &str = "Value";
pub const COLUMN_KEY: &str = "Variable";
pub const COLUMN_VALUE: &str = "col_name_in_data";
pub const SETTING_KEY: &str = "Setting";
pub const SETTING_VALUE: &str = "Value";

/// Read a two-column key/value table. Rows with a blank key or blank value are
/// skipped; a key appearing twice is an error.
pub fn key_value_entries(
    table: &DataTable,
    key_column: &str,
    value_column: &str,
    context: &'static str,
) -> ConfigResult<BTreeMap<String, String>> {
    let keys = table
        .column(key_column)
        .ok_or_else(|| ConfigError::MissingTableColumn {
            table: context,
            column: key_column.to_string(),
        })?;
    let values = table
        .column(value_column)
        .ok_or_else(|| ConfigError::MissingTableColumn {
            table: context,
            column: value_column.to_string(),
        })?;

    let mut entries = BTreeMap::new();
    for (key, value) in keys.iter().zip(values.iter()) {
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        if entries.insert(key.to_string(), value.to_string()).is_some() {
            return Err(ConfigError::DuplicateKey {
                key: key.to_string(),
                table: context,
            });
        }
    }
    Ok(entries)
}

/// Fail naming every required parameter absent from `entries`.
pub fn validate_parameters(entries: &BTreeMap<String, String>) -> ConfigResult<()> {
    let missing: Vec<String> = REQUIRED_PARAMETERS
        .iter()
        .filter(|name| !entries.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingParameters { names: missing })
    }
}

/// Fail naming every required variable without a mapping and every mapped
/// column absent from `data`.
pub fn validate_columns(columns: &ColumnMap, data: &DataTable) -> ConfigResult<()> {
    let unmapped: Vec<String> = Variable::required()
        .into_iter()
        .filter(|v| columns.lookup(*v).is_none())
        .map(Variable::token)
        .collect();

    let absent: BTreeSet<String> = columns
        .iter()
        .map(|(_, raw)| raw)
        .filter(|raw| !data.has_column(raw))
        .map(str::to_string)
        .collect();

    if unmapped.is_empty() && absent.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingColumns {
            unmapped,
            absent: absent.into_iter().collect(),
        })
    }
}

pub fn parameters_from_table(table: &DataTable) -> ConfigResult<ParameterSet> {
    let entries = key_value_entries(table, PARAMETER_KEY, PARAMETER_VALUE, "parameters")?;
    validate_parameters(&entries)?;

    let value = |name: &'static str| -> ConfigResult<f64> {
        // presence checked by validate_parameters
        let raw = entries.get(name).map(String::as_str).unwrap_or_default();
        parse_real(raw).ok_or_else(|| ConfigError::InvalidValue {
            field: format!("parameter '{name}'"),
            value: raw.to_string(),
            reason: "must be a finite number".to_string(),
        })
    };

    let params = ParameterSet {
        mu: value("mu")?,
        rho_l: value("rho_l")?,
        rho_s: value("rho_s")?,
        g: value("g")?,
        l0: value("L0")?,
        k: value("k")?,
    };
    validate_physical(&params)?;
    Ok(params)
}

/// Domain constraints that keep the settling-velocity formula real-valued.
pub fn validate_physical(params: &ParameterSet) -> ConfigResult<()> {
    for (name, value) in [("mu", params.mu), ("g", params.g)] {
        validate_positive_finite(name, value)?;
    }
    for (name, value) in [
        ("rho_l", params.rho_l),
        ("rho_s", params.rho_s),
        ("L0", params.l0),
        ("k", params.k),
    ] {
        if !value.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: format!("parameter '{name}'"),
                value: value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    if params.rho_s <= params.rho_l {
        return Err(ConfigError::InvalidValue {
            field: "parameter 'rho_s'".to_string(),
            value: params.rho_s.to_string(),
            reason: format!("must exceed rho_l ({})", params.rho_l),
        });
    }
    Ok(())
}

pub fn columns_from_table(table: &DataTable) -> ConfigResult<ColumnMap> {
    key_value_entries(table, COLUMN_KEY, COLUMN_VALUE, "column names").map(ColumnMap::new)
}

pub fn settings_from_table(table: &DataTable) -> ConfigResult<CalcSettings> {
    let mut entries = key_value_entries(table, SETTING_KEY, SETTING_VALUE, "calculation settings")?;
    let handling = entries
        .remove(EXTRAPOLATION_HANDLING)
        .ok_or(ConfigError::MissingSetting {
            name: EXTRAPOLATION_HANDLING,
        })?;

    let handling = ExtrapolationHandling::from(handling);
    if let ExtrapolationHandling::Unrecognized(value) = &handling {
        tracing::warn!(
            value = %value,
            "unrecognized extrapolation_handling; out-of-range targets will not be interpolated"
        );
    }

    Ok(CalcSettings {
        extrapolation_handling: handling,
        other: entries,
    })
}

fn validate_positive_finite(name: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: format!("parameter '{name}'"),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rows: &[&[&str]]) -> DataTable {
        DataTable::from_str_rows(&["Parameter", "Value"], rows).unwrap()
    }

    #[test]
    fn missing_parameters_are_all_named() {
        let table = params(&[&["mu", "0.01"], &["g", "980"], &["L0", "16.3"]]);
        let err = parameters_from_table(&table).unwrap_err();
        match err {
            ConfigError::MissingParameters { names } => {
                assert_eq!(names, vec!["rho_l", "rho_s", "k"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_parameter_is_rejected() {
        let table = params(&[
            &["mu", "0.01"],
            &["rho_l", "1.0"],
            &["rho_s", "2.65"],
            &["g", "980"],
            &["L0", "16.3"],
            &["k", "abc"],
        ]);
        let err = parameters_from_table(&table).unwrap_err();
        assert!(err.to_string().contains("parameter 'k'"), "{err}");
    }

    #[test]
    fn solid_must_be_denser_than_liquid() {
        let table = params(&[
            &["mu", "0.01"],
            &["rho_l", "2.65"],
            &["rho_s", "1.0"],
            &["g", "980"],
            &["L0", "16.3"],
            &["k", "0.164"],
        ]);
        let err = parameters_from_table(&table).unwrap_err();
        assert!(err.to_string().contains("rho_s"), "{err}");
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let table = params(&[&["mu", "0.01"], &["mu", "0.02"]]);
        let err = key_value_entries(&table, "Parameter", "Value", "parameters").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateKey { .. }));
    }

    #[test]
    fn key_value_table_needs_its_headers() {
        let table = DataTable::from_str_rows(&["Name", "Value"], &[]).unwrap();
        let err = parameters_from_table(&table).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingTableColumn { column, .. } if column == "Parameter"
        ));
    }

    #[test]
    fn blank_mappings_count_as_unmapped() {
        let colnames = DataTable::from_str_rows(
            &["Variable", "col_name_in_data"],
            &[&["C", "Calib"], &["R_30", ""]],
        )
        .unwrap();
        let columns = columns_from_table(&colnames).unwrap();
        assert_eq!(columns.len(), 1);

        let data = DataTable::from_str_rows(&["Calib"], &[]).unwrap();
        let err = validate_columns(&columns, &data).unwrap_err();
        match err {
            ConfigError::MissingColumns { unmapped, absent } => {
                assert_eq!(unmapped.len(), 12);
                assert!(unmapped.contains(&"R_30".to_string()));
                assert!(absent.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn settings_require_extrapolation_handling() {
        let table =
            DataTable::from_str_rows(&["Setting", "Value"], &[&["decimals", "3"]]).unwrap();
        let err = settings_from_table(&table).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting { .. }));

        let table = DataTable::from_str_rows(
            &["Setting", "Value"],
            &[&["extrapolation_handling", "extrapolate"], &["decimals", "3"]],
        )
        .unwrap();
        let settings = settings_from_table(&table).unwrap();
        assert_eq!(
            settings.extrapolation_handling,
            ExtrapolationHandling::Extrapolate
        );
        assert_eq!(settings.other.get("decimals").map(String::as_str), Some("3"));
    }
}
