//! Load a batch of draft rows from a CSV file.
//!
//! Headers are matched to sheet columns case-insensitively with whitespace
//! collapsed, so a hand-edited file does not need to reproduce the sheet's
//! exact spacing. Unknown headers are an error rather than silently ignored;
//! a file that does not fit the sheet should say so before anything is sent.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use escale_model::{DraftRow, SheetSchema};

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read draft rows from `path`, mapped onto `schema`'s columns.
///
/// Fully blank rows are skipped; at most `limit` data rows may remain.
pub fn read_draft_csv(path: &Path, schema: &SheetSchema, limit: usize) -> Result<Vec<DraftRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    // Position in the CSV record -> sheet column name. Empty headers (a
    // trailing comma, typically) map to nothing.
    let mut mapping: Vec<Option<String>> = Vec::with_capacity(headers.len());
    for raw in headers.iter() {
        let wanted = normalize_header(raw).to_lowercase();
        if wanted.is_empty() {
            mapping.push(None);
            continue;
        }
        let column = schema
            .columns
            .iter()
            .find(|column| normalize_header(&column.name).to_lowercase() == wanted);
        match column {
            Some(column) => mapping.push(Some(column.name.clone())),
            None => {
                return Err(IngestError::UnknownCsvColumn {
                    column: normalize_header(raw),
                });
            }
        }
    }

    let mut drafts = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut draft = DraftRow::empty(schema);
        for (position, cell) in record.iter().enumerate() {
            if let Some(Some(column)) = mapping.get(position) {
                draft.set(column.clone(), normalize_cell(cell));
            }
        }
        if draft.is_blank() {
            continue;
        }
        drafts.push(draft);
    }
    if drafts.len() > limit {
        return Err(IngestError::TooManyRows {
            found: drafts.len(),
            limit,
        });
    }
    debug!(rows = drafts.len(), path = %path.display(), "loaded draft rows");
    Ok(drafts)
}
