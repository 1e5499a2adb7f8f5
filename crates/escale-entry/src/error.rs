//! Error types for batch entry.

use thiserror::Error;

use escale_client::ApiError;

/// Errors that can occur while drafting or submitting a batch.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EntryError {
    /// The batch already holds the maximum number of rows.
    #[error("cannot hold more than {max} draft rows")]
    BatchFull {
        /// The capacity that was hit.
        max: usize,
    },

    /// A row index outside the current batch.
    #[error("no draft row {index} (the batch has {rows})")]
    RowOutOfRange {
        /// The index that was asked for.
        index: usize,
        /// How many rows the batch holds.
        rows: usize,
    },

    /// A column the sheet schema does not know.
    #[error("no column named {column:?} in this sheet")]
    UnknownColumn {
        /// The name that failed to resolve.
        column: String,
    },

    /// Submit was called while every row was still empty.
    #[error("fill in at least one row before submitting")]
    NothingToSubmit,

    /// Submit was called while cells still fail validation.
    #[error("{count} cell(s) failed validation")]
    ValidationFailed {
        /// Number of failing cells in the error map.
        count: usize,
    },

    /// The backend rejected a row during submit.
    ///
    /// Rows accepted before the rejection stay persisted; there is no
    /// rollback.
    #[error("row {failed_row} was rejected after {submitted} row(s) were saved")]
    SubmitRejected {
        /// Rows the backend accepted before the failure.
        submitted: usize,
        /// 1-based position of the rejected row in the batch.
        failed_row: usize,
        /// What the backend said.
        #[source]
        source: ApiError,
    },
}

/// Result type alias for entry operations.
pub type Result<T> = std::result::Result<T, EntryError>;
