//! In-memory rectangular table of string cells with named columns.
//!
//! Cells stay as text until a consumer asks for a number, so a table can be
//! loaded and written back without losing the caller's formatting.

use std::collections::HashSet;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table, checking that headers are unique and every row has one
    /// cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::DuplicateColumn { name: name.clone() });
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != headers.len() {
                return Err(CoreError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected: headers.len(),
                });
            }
        }
        Ok(Self { headers, rows })
    }

    /// Convenience constructor for literal tables.
    pub fn from_str_rows(headers: &[&str], rows: &[&[&str]]) -> CoreResult<Self> {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        self.column_index(name).map(|index| Column {
            table: self,
            index,
        })
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Append a column on the right. `values` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) -> CoreResult<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(CoreError::DuplicateColumn { name });
        }
        if values.len() != self.rows.len() {
            return Err(CoreError::ColumnLength {
                name,
                found: values.len(),
                expected: self.rows.len(),
            });
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self.headers.push(name);
        Ok(())
    }
}

/// Borrowed view of one table column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    table: &'a DataTable,
    index: usize,
}

impl<'a> Column<'a> {
    pub fn name(&self) -> &'a str {
        &self.table.headers[self.index]
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&'a str> {
        self.table.cell(row, self.index)
    }

    /// Numeric value of a cell; `None` when the cell is missing, blank or
    /// not a finite number.
    pub fn real(&self, row: usize) -> Option<f64> {
        self.get(row).and_then(crate::parse_real)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let index = self.index;
        self.table.rows.iter().map(move |r| r[index].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::from_str_rows(&["id", "R_30"], &[&["a", "31.5"], &["b", "x"]]).unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = DataTable::from_str_rows(&["a", "b"], &[&["1"]]).unwrap_err();
        assert_eq!(
            err,
            CoreError::RaggedRow {
                row: 0,
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn rejects_duplicate_headers() {
        let err = DataTable::from_str_rows(&["a", "a"], &[]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateColumn { .. }));
    }

    #[test]
    fn column_view_reads_cells() {
        let table = sample();
        let col = table.column("R_30").unwrap();
        assert_eq!(col.name(), "R_30");
        assert_eq!(col.len(), 2);
        assert_eq!(col.real(0), Some(31.5));
        assert_eq!(col.real(1), None);
        assert_eq!(col.iter().collect::<Vec<_>>(), vec!["31.5", "x"]);
        assert!(table.column("R_60").is_none());
    }

    #[test]
    fn push_column_appends_on_the_right() {
        let mut table = sample();
        table
            .push_column("P_30", vec!["1".into(), "2".into()])
            .unwrap();
        assert_eq!(table.headers(), &["id", "R_30", "P_30"]);
        assert_eq!(table.cell(1, 2), Some("2"));

        let err = table.push_column("short", vec!["1".into()]).unwrap_err();
        assert!(matches!(err, CoreError::ColumnLength { .. }));
        let err = table
            .push_column("id", vec!["1".into(), "2".into()])
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateColumn { .. }));
    }
}
