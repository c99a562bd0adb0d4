//! CSV table loading and saving.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use hm_config::HydrometerConfig;
use hm_core::DataTable;

use crate::error::{AppError, AppResult};

/// Load a CSV file with a header row into a [`DataTable`].
///
/// Whitespace around fields is trimmed and a leading byte-order mark on the
/// first header is dropped. Every row must have one field per header.
pub fn read_table(path: &Path) -> AppResult<DataTable> {
    let read_err = |source| AppError::TableRead {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(read_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(read_err)?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), cols = headers.len(), "read table");

    DataTable::new(headers, rows).map_err(|e| AppError::TableShape {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write `table` as CSV, creating parent directories as needed.
pub fn write_table(path: &Path, table: &DataTable) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let write_err = |source| AppError::TableWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new().from_path(path).map_err(write_err)?;
    writer.write_record(table.headers()).map_err(write_err)?;
    for row in table.rows() {
        writer.write_record(row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| write_err(csv::Error::from(e)))?;

    tracing::debug!(path = %path.display(), rows = table.n_rows(), "wrote table");
    Ok(())
}

/// Read the three configuration tables and validate them against `data`.
pub fn load_config(
    parameters: &Path,
    column_names: &Path,
    settings: &Path,
    data: &DataTable,
) -> AppResult<HydrometerConfig> {
    let parameters = read_table(parameters)?;
    let column_names = read_table(column_names)?;
    let settings = read_table(settings)?;
    Ok(HydrometerConfig::from_tables(
        &parameters,
        &column_names,
        &settings,
        data,
    )?)
}
