//! Per-cell validation failures for a draft batch.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::CellError;

/// Validation failures keyed by draft row index, then column name.
///
/// Absence of an entry means the cell is valid; blank cells therefore never
/// appear here at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap {
    rows: BTreeMap<usize, BTreeMap<String, CellError>>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, row: usize, column: &str, error: CellError) {
        self.rows
            .entry(row)
            .or_default()
            .insert(column.to_string(), error);
    }

    /// Drop the entry for one cell, if any. Rows left without entries
    /// disappear entirely so emptiness checks stay honest.
    pub fn clear_cell(&mut self, row: usize, column: &str) {
        if let Some(columns) = self.rows.get_mut(&row) {
            columns.remove(column);
            if columns.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    pub fn get(&self, row: usize, column: &str) -> Option<CellError> {
        self.rows.get(&row).and_then(|columns| columns.get(column)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of failing cells.
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Remove one row's entries and shift the indices of every row after it
    /// down by one, keeping the map aligned with the batch it describes.
    pub fn remove_row(&mut self, row: usize) {
        self.rows.remove(&row);
        let shifted: Vec<(usize, BTreeMap<String, CellError>)> =
            self.rows.split_off(&row).into_iter().collect();
        for (index, columns) in shifted {
            self.rows.insert(index - 1, columns);
        }
    }

    /// All failing cells in (row, column) order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, CellError)> {
        self.rows.iter().flat_map(|(row, columns)| {
            columns
                .iter()
                .map(move |(column, error)| (*row, column.as_str(), *error))
        })
    }
}
