use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::SheetSchema;

/// Identifier of a persisted row.
///
/// The backend hands out the physical Excel row index (the header sits in
/// row 1, so the first data row is 2). The id is stable for the lifetime of
/// the workbook but is reassigned when rows above it are deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RowId(i64);

impl RowId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RowId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// One cell as it crosses the wire: a JSON scalar or nothing.
///
/// Deserialization order matters for the untagged representation; `Missing`
/// only matches `null`, so it goes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The user-facing rendering. Missing cells render empty; numbers use
    /// `f64`'s display, which drops an integral value's fraction (`45.0`
    /// prints as `45`, the way the sheet showed it).
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A saved row: its backend id plus its cells keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRow {
    pub id: RowId,
    pub cells: BTreeMap<String, CellValue>,
}

impl PersistedRow {
    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Rendering of one cell, empty string when the column is absent.
    pub fn display_value(&self, column: &str) -> String {
        self.cell(column).map(CellValue::display).unwrap_or_default()
    }
}

/// Everything the backend returns for one sheet's data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetPage {
    /// Header names in sheet order.
    pub headers: Vec<String>,
    pub rows: Vec<PersistedRow>,
    /// The backend's row count, which can exceed `rows.len()` when rows
    /// were dropped at the decoding boundary.
    pub total_rows: usize,
}

impl SheetPage {
    pub fn find_row(&self, id: RowId) -> Option<&PersistedRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An editable row under construction.
///
/// Values stay exactly as typed; the validation layer decides what they
/// mean. Keys are column names and are kept in sync with the schema by the
/// entry engine, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRow {
    cells: BTreeMap<String, String>,
}

impl DraftRow {
    /// A draft with every schema column present and blank.
    pub fn empty(schema: &SheetSchema) -> Self {
        Self {
            cells: schema
                .column_names()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        }
    }

    /// The raw value for a column, empty string when never set.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map_or("", String::as_str)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// True when no cell holds anything but whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.trim().is_empty())
    }

    pub fn cells(&self) -> &BTreeMap<String, String> {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_display_matches_sheet_rendering() {
        assert_eq!(CellValue::Number(45.0).display(), "45");
        assert_eq!(CellValue::Number(45.5).display(), "45.5");
        assert_eq!(CellValue::Number(-0.25).display(), "-0.25");
        assert_eq!(CellValue::Missing.display(), "");
        assert_eq!(CellValue::Bool(true).display(), "true");
        assert_eq!(CellValue::Text("MV Atlas".into()).display(), "MV Atlas");
    }

    #[test]
    fn cell_value_untagged_round_trip() {
        let row: BTreeMap<String, CellValue> = serde_json::from_str(
            r#"{"Navire": "MV Atlas", "Tonnage": 1200.5, "Conteneurs": 80, "Done": true, "Obs": null}"#,
        )
        .unwrap();
        assert_eq!(row["Navire"], CellValue::Text("MV Atlas".into()));
        assert_eq!(row["Tonnage"], CellValue::Number(1200.5));
        assert_eq!(row["Conteneurs"], CellValue::Number(80.0));
        assert_eq!(row["Done"], CellValue::Bool(true));
        assert_eq!(row["Obs"], CellValue::Missing);

        let json = serde_json::to_string(&CellValue::Missing).unwrap();
        assert_eq!(json, "null");
    }

    #[test]
    fn row_id_parses_from_text() {
        assert_eq!(" 42 ".parse::<RowId>().unwrap(), RowId::new(42));
        assert!("4x".parse::<RowId>().is_err());
        assert_eq!(RowId::new(7).to_string(), "7");
    }
}
