//! Load tables, validate, calculate and persist one run.

use std::path::PathBuf;

use hm_calc::{CalcOutput, HydrometerCalc};
use hm_config::HydrometerConfig;
use hm_core::DataTable;

use crate::error::AppResult;
use crate::io::{load_config, read_table, write_table};
use crate::manifest::RunManifest;

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub rows: usize,
    /// Rows whose 2 µm value was truncated, extrapolated or missing.
    pub flagged_2um: usize,
    /// Rows whose 50 µm value was truncated, extrapolated or missing.
    pub flagged_50um: usize,
    pub output_path: Option<PathBuf>,
    pub table: DataTable,
}

/// Read and validate every input without calculating.
pub fn validate(request: &RunManifest) -> AppResult<HydrometerConfig> {
    let data = read_table(&request.data)?;
    load_config(
        &request.parameters,
        &request.column_names,
        &request.settings,
        &data,
    )
}

/// Run the full calculation and write the result table if an output path is
/// set.
pub fn run(request: &RunManifest) -> AppResult<RunResponse> {
    let data = read_table(&request.data)?;
    let config = load_config(
        &request.parameters,
        &request.column_names,
        &request.settings,
        &data,
    )?;

    let calc = HydrometerCalc::new(&data, config)?;
    let output: CalcOutput = calc.calculate()?;
    let table = output.to_table(&data)?;

    if let Some(path) = &request.output {
        write_table(path, &table)?;
        tracing::info!(path = %path.display(), rows = table.n_rows(), "results written");
    }

    Ok(RunResponse {
        rows: output.samples.len(),
        flagged_2um: output.flagged_2um(),
        flagged_50um: output.flagged_50um(),
        output_path: request.output.clone(),
        table,
    })
}
