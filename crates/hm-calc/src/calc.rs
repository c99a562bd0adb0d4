//! Whole-table calculation: validated configuration in, one result per row out.

use hm_config::HydrometerConfig;
use hm_core::{Column, DataTable, PerTime};
use rayon::prelude::*;

use crate::error::{CalcResult, MappingError};
use crate::fractions::{CLAY_DIAMETER, SILT_DIAMETER, SizeFractions};
use crate::interpolate::{DiameterPoint, Interpolated, interpolate_percent_finer};
use crate::pipeline::{RawSample, TimeDerived, derive_sample, read_raw_sample};
use crate::resolve::ColumnResolver;

/// Everything computed for one sample row.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleResult {
    pub raw: RawSample,
    pub derived: PerTime<TimeDerived>,
    pub finer_2um: Interpolated,
    pub finer_50um: Interpolated,
    pub fractions: SizeFractions,
}

/// Run the formula chain, both interpolations and the fraction split for one
/// row.
pub fn process_sample(
    config: &HydrometerConfig,
    raw: RawSample,
    row: usize,
) -> CalcResult<SampleResult> {
    let derived = derive_sample(&config.parameters, &raw, row)?;
    let points = DiameterPoint::from_derived(&derived);
    let handling = &config.settings.extrapolation_handling;

    let finer_2um = interpolate_percent_finer(&points, CLAY_DIAMETER, handling);
    let finer_50um = interpolate_percent_finer(&points, SILT_DIAMETER, handling);
    let fractions = SizeFractions::from_percent_finer(finer_2um.value, finer_50um.value);

    Ok(SampleResult {
        raw,
        derived,
        finer_2um,
        finer_50um,
        fractions,
    })
}

/// A calculation bound to one data table and a configuration validated
/// against it.
#[derive(Debug, Clone)]
pub struct HydrometerCalc<'a> {
    data: &'a DataTable,
    config: HydrometerConfig,
}

impl<'a> HydrometerCalc<'a> {
    /// Bind `config` to `data`, failing if any mapped column is missing.
    pub fn new(data: &'a DataTable, config: HydrometerConfig) -> CalcResult<Self> {
        config.validate_against(data)?;
        tracing::info!(rows = data.n_rows(), "hydrometer calculation initialized");
        Ok(Self { data, config })
    }

    /// Parse and validate the three configuration tables, then bind them to
    /// `data`.
    pub fn from_tables(
        data: &'a DataTable,
        parameters: &DataTable,
        column_names: &DataTable,
        settings: &DataTable,
    ) -> CalcResult<Self> {
        let config = HydrometerConfig::from_tables(parameters, column_names, settings, data)?;
        Self::new(data, config)
    }

    pub fn resolver(&self) -> ColumnResolver<'_> {
        ColumnResolver::new(&self.config.columns, self.data)
    }

    pub fn resolve_column(&self, name: &str) -> Result<Column<'_>, MappingError> {
        self.resolver().resolve_column(name)
    }

    /// Process every row. Rows are independent and evaluated in parallel;
    /// results keep input order and the error of the lowest failing row wins.
    pub fn calculate(&self) -> CalcResult<CalcOutput> {
        let columns = self.resolver().raw_columns()?;

        let results: Vec<CalcResult<SampleResult>> = (0..self.data.n_rows())
            .into_par_iter()
            .map(|row| {
                let raw = read_raw_sample(&columns, row)?;
                process_sample(&self.config, raw, row)
            })
            .collect();

        let samples = results.into_iter().collect::<CalcResult<Vec<_>>>()?;
        let output = CalcOutput { samples };

        tracing::info!(
            rows = output.samples.len(),
            flagged_2um = output.flagged_2um(),
            flagged_50um = output.flagged_50um(),
            "hydrometer calculation complete"
        );
        Ok(output)
    }
}

/// Per-row results in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalcOutput {
    pub samples: Vec<SampleResult>,
}

impl CalcOutput {
    /// Rows whose 2 µm value needed boundary handling or failed.
    pub fn flagged_2um(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.finer_2um.method.is_flagged())
            .count()
    }

    /// Rows whose 50 µm value needed boundary handling or failed.
    pub fn flagged_50um(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.finer_50um.method.is_flagged())
            .count()
    }
}
