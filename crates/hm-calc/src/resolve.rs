//! Standardized variable name -> data column.

use hm_config::{ColumnMap, Variable};
use hm_core::{Column, DataTable, PerTime};

use crate::error::MappingError;

#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver<'a> {
    columns: &'a ColumnMap,
    data: &'a DataTable,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(columns: &'a ColumnMap, data: &'a DataTable) -> Self {
        Self { columns, data }
    }

    /// Column holding the values of the standardized variable `name`.
    ///
    /// Checked on every call, independent of any earlier configuration
    /// validation.
    pub fn resolve_column(&self, name: &str) -> Result<Column<'a>, MappingError> {
        let raw = self
            .columns
            .get(name)
            .ok_or_else(|| MappingError::Unmapped {
                name: name.to_string(),
            })?;

        self.data
            .column(raw)
            .ok_or_else(|| MappingError::MissingColumn {
                name: name.to_string(),
                column: raw.to_string(),
            })
    }

    pub fn resolve(&self, variable: Variable) -> Result<Column<'a>, MappingError> {
        self.resolve_column(&variable.token())
    }

    /// Resolve every column the formula pipeline reads.
    pub fn raw_columns(&self) -> Result<RawColumns<'a>, MappingError> {
        Ok(RawColumns {
            temperature: PerTime::try_from_fn(|t| self.resolve(Variable::Temperature(t)))?,
            reading: PerTime::try_from_fn(|t| self.resolve(Variable::Reading(t)))?,
            blank: PerTime::try_from_fn(|t| self.resolve(Variable::Blank(t)))?,
            calibration: self.resolve(Variable::Calibration)?,
        })
    }
}

/// Data columns backing the raw inputs of a sample row.
#[derive(Debug, Clone, Copy)]
pub struct RawColumns<'a> {
    pub temperature: PerTime<Column<'a>>,
    pub reading: PerTime<Column<'a>>,
    pub blank: PerTime<Column<'a>>,
    pub calibration: Column<'a>,
}
