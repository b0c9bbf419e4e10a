//! Sheet row contract
//!
//! A sheet is the in-memory form of one uploaded spreadsheet: the header
//! row (`columns`) and one map of cells per data row. Cells hold JSON
//! scalars so numeric columns such as `Rep` arrive unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::Result;

/// One data row, keyed by column name
pub type Row = BTreeMap<String, Value>;

/// Uploaded sheet: declared columns plus rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Header row. Inferred from row keys when omitted.
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create sheet from explicit header and rows
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut sheet = Self { columns, rows };
        sheet.infer_columns();
        sheet
    }

    /// Build a sheet of text cells, one `values` slice per row
    ///
    /// Empty strings are left out of the row (treated as blank cells).
    pub fn from_text_rows(columns: &[&str], values: &[&[&str]]) -> Self {
        let rows = values
            .iter()
            .map(|cells| {
                columns
                    .iter()
                    .zip(cells.iter())
                    .filter(|(_, cell)| !cell.is_empty())
                    .map(|(column, cell)| (column.to_string(), Value::String(cell.to_string())))
                    .collect()
            })
            .collect();

        Self::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    /// Parse a sheet from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut sheet: Sheet = serde_json::from_str(json)?;
        sheet.infer_columns();
        Ok(sheet)
    }

    /// Read a sheet from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Fill `columns` from row keys (first-seen order) when no header was given
    pub fn infer_columns(&mut self) {
        if !self.columns.is_empty() {
            return;
        }
        for row in &self.rows {
            for key in row.keys() {
                if !self.columns.iter().any(|c| c == key) {
                    self.columns.push(key.clone());
                }
            }
        }
    }

    /// Whether the header declares `column`
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Text value of a cell, `None` when blank or absent
    pub fn cell_text(&self, row: usize, column: &str) -> Option<String> {
        let value = self.rows.get(row)?.get(column)?;
        let text = match value {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
