//! The draft-row batch and its validation state.

use escale_model::{DraftRow, PersistedRow, RowId, SheetSchema};
use escale_validate::{CellError, ErrorMap, validate_value};

use crate::error::{EntryError, Result};

/// Most draft rows a batch may hold at once.
pub const MAX_ROWS: usize = 10;

/// What a submit will do with the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Append every non-empty draft row as a new row.
    Create,
    /// Overwrite the persisted row with this id.
    Edit(RowId),
}

/// A bounded batch of draft rows being typed in for one sheet.
///
/// The batch always holds between 1 and [`MAX_ROWS`] rows. Cell edits
/// re-validate only the touched cell; [`EntryBatch::validate_all`] rebuilds
/// the whole [`ErrorMap`] and is the submit-time gate.
#[derive(Debug, Clone)]
pub struct EntryBatch {
    pub(crate) schema: SheetSchema,
    pub(crate) rows: Vec<DraftRow>,
    pub(crate) errors: ErrorMap,
    pub(crate) mode: EntryMode,
}

impl EntryBatch {
    /// A batch with one empty row, in create mode.
    #[must_use]
    pub fn new(schema: SheetSchema) -> Self {
        let rows = vec![DraftRow::empty(&schema)];
        Self {
            schema,
            rows,
            errors: ErrorMap::new(),
            mode: EntryMode::Create,
        }
    }

    /// Start over with `count` empty rows, clamped to `1..=MAX_ROWS`.
    ///
    /// Clears the error map and returns to create mode, replacing whatever
    /// the batch held before.
    pub fn initialize_rows(&mut self, count: usize) {
        let count = count.clamp(1, MAX_ROWS);
        self.rows = (0..count).map(|_| DraftRow::empty(&self.schema)).collect();
        self.errors.clear();
        self.mode = EntryMode::Create;
    }

    /// Append one empty row.
    pub fn add_row(&mut self) -> Result<()> {
        if self.rows.len() >= MAX_ROWS {
            return Err(EntryError::BatchFull { max: MAX_ROWS });
        }
        self.rows.push(DraftRow::empty(&self.schema));
        Ok(())
    }

    /// Clone the row at `index` and append the copy.
    ///
    /// The copy starts with no recorded errors; like any other untouched
    /// row it is checked again by the submit-time gate.
    pub fn duplicate_row(&mut self, index: usize) -> Result<()> {
        if self.rows.len() >= MAX_ROWS {
            return Err(EntryError::BatchFull { max: MAX_ROWS });
        }
        let Some(row) = self.rows.get(index) else {
            return Err(EntryError::RowOutOfRange {
                index,
                rows: self.rows.len(),
            });
        };
        let copy = row.clone();
        self.rows.push(copy);
        Ok(())
    }

    /// Remove the row at `index` and re-index the error map.
    ///
    /// The last remaining row and out-of-range indexes are left alone.
    pub fn remove_row(&mut self, index: usize) {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
        self.errors.remove_row(index);
    }

    /// Overwrite one cell and re-validate just that cell.
    pub fn set_cell(&mut self, row: usize, column: &str, value: impl Into<String>) -> Result<()> {
        if row >= self.rows.len() {
            return Err(EntryError::RowOutOfRange {
                index: row,
                rows: self.rows.len(),
            });
        }
        if !self.schema.contains(column) {
            return Err(EntryError::UnknownColumn {
                column: column.to_string(),
            });
        }

        let value = value.into();
        match validate_value(&self.schema, column, &value) {
            Ok(()) => self.errors.clear_cell(row, column),
            Err(error) => self.errors.record(row, column, error),
        }
        self.rows[row].set(column, value);
        Ok(())
    }

    /// The raw value of one cell, empty string when out of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> &str {
        self.rows.get(row).map_or("", |r| r.get(column))
    }

    /// Rebuild the whole error map. Returns true when every cell passes.
    pub fn validate_all(&mut self) -> bool {
        self.errors.clear();
        for index in 0..self.rows.len() {
            self.validate_row(index);
        }
        self.errors.is_empty()
    }

    fn validate_row(&mut self, index: usize) {
        let Some(row) = self.rows.get(index) else {
            return;
        };
        let failures: Vec<(String, CellError)> = self
            .schema
            .column_names()
            .filter_map(|column| {
                validate_value(&self.schema, column, row.get(column))
                    .err()
                    .map(|error| (column.to_string(), error))
            })
            .collect();
        for (column, error) in failures {
            self.errors.record(index, &column, error);
        }
    }

    /// Seed a single-row batch from a persisted row and switch to edit mode.
    ///
    /// Numbers are stringified the way the table renders them, so `45.0`
    /// seeds the draft as `"45"`. Nothing is validated until the next cell
    /// edit or the submit gate.
    pub fn begin_edit(&mut self, row: &PersistedRow) {
        let mut draft = DraftRow::empty(&self.schema);
        for column in self.schema.column_names() {
            draft.set(column, row.display_value(column));
        }
        self.rows = vec![draft];
        self.errors.clear();
        self.mode = EntryMode::Edit(row.id);
    }

    /// Abandon an edit and return to a single empty create row.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// Back to one empty row, create mode, no errors.
    pub fn reset(&mut self) {
        self.initialize_rows(1);
    }

    #[must_use]
    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    #[must_use]
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    #[must_use]
    pub fn schema(&self) -> &SheetSchema {
        &self.schema
    }
}
