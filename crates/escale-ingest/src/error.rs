use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading draft rows from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    /// CSV file could not be opened or parsed.
    #[error("failed to read CSV {}: {source}", path.display())]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A CSV header matches no column of the target sheet.
    #[error("CSV column '{column}' does not exist in the sheet")]
    UnknownCsvColumn { column: String },

    /// More data rows than one batch may carry.
    #[error("CSV holds {found} data rows; at most {limit} can be submitted at a time")]
    TooManyRows { found: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, IngestError>;
