use crate::error::{DashboardError, Result};

/// One tabular read from the warehouse: ordered column names plus string
/// cells. Values stay untyped here; each view applies its own cleaning
/// policy when it extracts columns.
///
/// Column names are addressed by exact match, so `normalize_columns` must
/// run before any name-based lookup on tables whose exports carry mixed
/// case or padding.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Trim and upper-case every column name so later lookups are case and
    /// whitespace insensitive. No-op on already-normalized tables.
    pub fn normalize_columns(&mut self) {
        for column in &mut self.columns {
            *column = column.trim().to_uppercase();
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Column lookup that treats absence as a schema mismatch.
    pub fn require(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| DashboardError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Cell access. Flexible CSV reads can leave short rows; missing cells
    /// read as the empty string and fall to the cleaners' missing paths.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
