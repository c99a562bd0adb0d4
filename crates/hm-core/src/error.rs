use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Duplicate column name: {name}")]
    DuplicateColumn { name: String },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Column '{name}' has {found} values, table has {expected} rows")]
    ColumnLength {
        name: String,
        found: usize,
        expected: usize,
    },
}
