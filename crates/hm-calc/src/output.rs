//! Result table: the input table extended with every derived column.

use hm_core::{DataTable, SampleTime, format_real};

use crate::calc::{CalcOutput, SampleResult};
use crate::error::CalcResult;
use crate::pipeline::TimeDerived;

type Getter = fn(&SampleResult) -> String;

/// Per-time derived column, named from its sampling time.
struct PerTimeColumn {
    name: fn(SampleTime) -> String,
    value: fn(&TimeDerived) -> f64,
}

const PER_TIME_COLUMNS: [PerTimeColumn; 5] = [
    PerTimeColumn {
        name: |t| format!("temp_corr_{t}"),
        value: |d| d.temperature_correction,
    },
    PerTimeColumn {
        name: |t| format!("R{t}_corr"),
        value: |d| d.corrected_reading,
    },
    PerTimeColumn {
        name: |t| format!("hprime_{t}"),
        value: |d| d.effective_depth,
    },
    PerTimeColumn {
        name: |t| format!("X_{t}"),
        value: |d| d.diameter,
    },
    PerTimeColumn {
        name: |t| format!("P_{t}"),
        value: |d| d.percent_finer,
    },
];

const SUMMARY_COLUMNS: [(&str, Getter); 7] = [
    ("P_2um", |s| format_real(s.finer_2um.value)),
    ("Warning_2um", |s| s.finer_2um.warning.clone()),
    ("P_50um", |s| format_real(s.finer_50um.value)),
    ("Warning_50um", |s| s.finer_50um.warning.clone()),
    ("P_clay", |s| format_real(s.fractions.clay)),
    ("P_sand", |s| format_real(s.fractions.sand)),
    ("P_silt", |s| format_real(s.fractions.silt)),
];

/// Names of the appended columns, in the order they are written.
pub fn derived_column_names() -> Vec<String> {
    let mut names = Vec::with_capacity(PER_TIME_COLUMNS.len() * 4 + SUMMARY_COLUMNS.len());
    for column in &PER_TIME_COLUMNS {
        names.extend(SampleTime::ALL.map(column.name));
    }
    names.extend(SUMMARY_COLUMNS.iter().map(|(name, _)| name.to_string()));
    names
}

impl CalcOutput {
    /// Copy `input` and append the derived columns. Input columns and row
    /// order are preserved.
    pub fn to_table(&self, input: &DataTable) -> CalcResult<DataTable> {
        let mut table = input.clone();

        for column in &PER_TIME_COLUMNS {
            for time in SampleTime::ALL {
                let values = self
                    .samples
                    .iter()
                    .map(|s| format_real((column.value)(&s.derived[time])))
                    .collect();
                table.push_column((column.name)(time), values)?;
            }
        }

        for (name, get) in SUMMARY_COLUMNS {
            table.push_column(name, self.samples.iter().map(get).collect())?;
        }

        Ok(table)
    }
}
