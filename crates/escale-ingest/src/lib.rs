mod draft_csv;
mod error;
mod payload;

pub use draft_csv::read_draft_csv;
pub use error::{IngestError, Result};
pub use payload::{decode_cell, decode_list, decode_schema, decode_sheet_page};
