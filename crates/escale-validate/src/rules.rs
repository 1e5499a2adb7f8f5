//! Type-directed validation of single cell values.
//!
//! Each rule rejects only what provably contradicts the column's declared
//! type. Blank cells always pass, so a half-filled draft row never lights up
//! before the user has typed anything.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use escale_model::{DataType, SheetSchema};

/// A plain decimal literal: optional sign, digits, optional fraction with
/// either `.` or `,` as the separator.
pub(crate) static NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+([.,]\d+)?$").expect("invalid numeric literal regex"));

/// Date shapes accepted as typed. The ISO prefix also admits
/// `datetime-local` values (`2026-01-15T08:30`), so no separate shape is
/// needed for those. Digits only; no calendar-level check.
static DATE_SHAPES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("invalid iso date regex"),
        Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("invalid slash date regex"),
        Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("invalid dash date regex"),
    ]
});

/// Headers that read as a bare row-numbering column when the backend sent no
/// type for them.
const NUMBERING_HEADERS: &[&str] = &["n°", "n", "#"];

/// Why one cell was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellError {
    #[error("must contain text, not only digits")]
    DigitsOnly,
    #[error("must be a number, not text")]
    NotANumber,
    #[error("must be a valid date")]
    NotADate,
}

/// True when the value reads as a single decimal number once internal
/// whitespace is removed, so `12 345,5` counts.
pub fn is_numeric_literal(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    NUMERIC_LITERAL.is_match(&compact)
}

/// True when the value contains at least one Unicode letter.
pub fn has_letters(value: &str) -> bool {
    value.chars().any(char::is_alphabetic)
}

/// True when the value matches one of the accepted date shapes.
pub fn is_date_shaped(value: &str) -> bool {
    DATE_SHAPES.iter().any(|shape| shape.is_match(value))
}

/// The type a column's values are checked against.
///
/// Declared types map through directly (`text` and `any` both mean
/// unconstrained); a column with no declared type falls back to a guess from
/// its header, where a bare numbering header reads as numeric.
pub fn expected_type(schema: &SheetSchema, column: &str) -> DataType {
    match schema.column(column).and_then(|def| def.data_type) {
        Some(DataType::Number) => DataType::Number,
        Some(DataType::TextOnly) => DataType::TextOnly,
        Some(DataType::Date) => DataType::Date,
        Some(DataType::Boolean) => DataType::Boolean,
        Some(DataType::Text | DataType::Any) => DataType::Any,
        None => {
            let lowered = column.trim().to_lowercase();
            if NUMBERING_HEADERS.contains(&lowered.as_str()) {
                DataType::Number
            } else {
                DataType::Any
            }
        }
    }
}

/// Check one raw value against its column's expected type.
///
/// The number rule rejects only values containing letters, so a malformed
/// literal like `1.2.3` still passes; the text-only rule rejects exactly the
/// values that read as bare numbers.
pub fn validate_value(schema: &SheetSchema, column: &str, value: &str) -> Result<(), CellError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match expected_type(schema, column) {
        DataType::TextOnly => {
            if is_numeric_literal(trimmed) && !has_letters(trimmed) {
                Err(CellError::DigitsOnly)
            } else {
                Ok(())
            }
        }
        DataType::Number => {
            if has_letters(trimmed) {
                Err(CellError::NotANumber)
            } else {
                Ok(())
            }
        }
        DataType::Date => {
            if is_date_shaped(trimmed) {
                Ok(())
            } else {
                Err(CellError::NotADate)
            }
        }
        _ => Ok(()),
    }
}
