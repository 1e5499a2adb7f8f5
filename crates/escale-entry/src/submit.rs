//! Submission of a validated batch through a backend.

use std::collections::BTreeMap;

use escale_client::SheetBackend;
use escale_model::{DraftRow, RowId, SheetSchema};
use tracing::{debug, warn};

use crate::batch::{EntryBatch, EntryMode};
use crate::error::{EntryError, Result};

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Number of rows appended to the sheet.
    Created(usize),
    /// The persisted row that was overwritten.
    Updated(RowId),
}

impl EntryBatch {
    /// Push the batch to the backend.
    ///
    /// Rows that are entirely blank are dropped first; if none remain the
    /// submit is refused. Validation gates the whole batch: nothing is sent
    /// while any cell fails. In create mode each remaining row goes out as
    /// its own request, in drafted order, stopping at the first rejection;
    /// rows accepted earlier stay persisted. On success the batch resets to
    /// a single empty create row.
    pub fn submit(&mut self, backend: &dyn SheetBackend) -> Result<SubmitOutcome> {
        let kept: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(index, _)| index)
            .collect();
        if kept.is_empty() {
            return Err(EntryError::NothingToSubmit);
        }
        if !self.validate_all() {
            return Err(EntryError::ValidationFailed {
                count: self.errors.len(),
            });
        }

        let outcome = match self.mode {
            EntryMode::Edit(id) => {
                let cells = row_body(&self.rows[kept[0]], &self.schema);
                backend
                    .update_row(&self.schema.filename, &self.schema.sheet_name, id, &cells)
                    .map_err(|source| EntryError::SubmitRejected {
                        submitted: 0,
                        failed_row: 1,
                        source,
                    })?;
                debug!(row_id = id.get(), "row updated");
                SubmitOutcome::Updated(id)
            }
            EntryMode::Create => {
                let mut submitted = 0;
                for &index in &kept {
                    let cells = row_body(&self.rows[index], &self.schema);
                    if let Err(source) =
                        backend.create_row(&self.schema.filename, &self.schema.sheet_name, &cells)
                    {
                        warn!(row = index + 1, submitted, "create rejected");
                        return Err(EntryError::SubmitRejected {
                            submitted,
                            failed_row: index + 1,
                            source,
                        });
                    }
                    submitted += 1;
                }
                debug!(count = submitted, "rows created");
                SubmitOutcome::Created(submitted)
            }
        };

        self.reset();
        Ok(outcome)
    }
}

/// One string per schema column, blanks included, ready for the wire.
fn row_body(row: &DraftRow, schema: &SheetSchema) -> BTreeMap<String, String> {
    schema
        .column_names()
        .map(|column| (column.to_string(), row.get(column).to_string()))
        .collect()
}
