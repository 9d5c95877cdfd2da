use serde::{Deserialize, Serialize};

/// One named column of raw cell text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub header: String,
    pub cells: Vec<String>,
}

impl Column {
    pub fn new(header: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            header: header.into(),
            cells,
        }
    }
}

/// Wide-format table: one column per group, rows aligned by position.
///
/// Invariant: every column holds the same number of cells. Construction
/// through [`WideTable::from_columns`] pads short columns to keep it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WideTable {
    columns: Vec<Column>,
}

impl WideTable {
    pub fn from_columns(mut columns: Vec<Column>) -> Self {
        let n_rows = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        for column in &mut columns {
            column.cells.resize(n_rows, String::new());
        }
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.n_rows() == 0
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    /// Flattens the table to long format: one record per cell, labeled with
    /// its column header, in column order. Non-numeric cells are kept as
    /// invalid records so callers can decide when to drop them.
    pub fn melt(&self) -> Vec<LongRecord> {
        let mut records = Vec::with_capacity(self.n_cols() * self.n_rows());
        for column in &self.columns {
            for cell in &column.cells {
                records.push(LongRecord {
                    group: column.header.clone(),
                    value: coerce_numeric(cell),
                });
            }
        }
        records
    }
}

/// One (group, value) observation. `value` is `None` when the source cell
/// did not parse as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRecord {
    pub group: String,
    pub value: Option<f64>,
}

impl LongRecord {
    pub fn is_numeric(&self) -> bool {
        self.value.is_some()
    }
}

/// Drops records whose cell failed numeric coercion. Idempotent.
pub fn retain_numeric(records: Vec<LongRecord>) -> Vec<LongRecord> {
    records.into_iter().filter(LongRecord::is_numeric).collect()
}

pub fn coerce_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
