//! Draft-row entry for escale sheets.
//!
//! An [`EntryBatch`] holds up to ten draft rows for one sheet, tracks
//! per-cell validation failures, and submits through any
//! [`SheetBackend`](escale_client::SheetBackend): every non-empty row as a
//! create, or a single row as an update when seeded from a persisted row.

pub mod batch;
pub mod error;
pub mod submit;

pub use batch::{EntryBatch, EntryMode, MAX_ROWS};
pub use error::{EntryError, Result};
pub use submit::SubmitOutcome;
