use std::collections::BTreeSet;
use std::fmt;

use super::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, guessed from its text at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Guess the type of a raw text cell.  Only finite numbers count as
    /// numeric; `nan` / `inf` stay textual.
    pub fn guess(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            return CellValue::Empty;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(s.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Numbers use the shortest representation that reads back to the same
/// `f64`, so `100.0` prints as `100`.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// One named column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            cells,
        }
    }
}

/// A rectangular table of named columns in file order.
///
/// Invariants (checked by [`Table::new`]): at least one column, unique
/// column names, all columns the same length.  Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(DashboardError::malformed("table has no columns"));
        };
        let n_rows = first.cells.len();

        let mut seen = BTreeSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(DashboardError::malformed(format!(
                    "duplicate column name '{}'",
                    col.name
                )));
            }
            if col.cells.len() != n_rows {
                return Err(DashboardError::malformed(format!(
                    "column '{}' has {} rows, expected {n_rows}",
                    col.name,
                    col.cells.len()
                )));
            }
        }

        Ok(Table { columns, n_rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of data rows (header excluded).
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Cells of row `idx`, in column order.
    pub fn row(&self, idx: usize) -> impl Iterator<Item = &CellValue> {
        self.columns.iter().filter_map(move |c| c.cells.get(idx))
    }
}
