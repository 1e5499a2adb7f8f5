//! Defensive decoding of backend payloads.
//!
//! The backend serves sheet metadata and data out of a cache layer that
//! sometimes stores list fields as JSON-encoded strings instead of arrays.
//! Every decoder here accepts both shapes and drops what it cannot make
//! sense of instead of failing: a partial page beats no page.

use serde_json::Value;
use tracing::warn;

use escale_model::{
    CellValue, ColumnDef, DataType, FieldType, PersistedRow, RowId, SheetPage, SheetSchema,
};

/// Decode a field that should hold a list.
///
/// Accepts a JSON array or a string containing JSON that parses to an array;
/// anything else (missing field, scalar, unparseable string) yields an empty
/// list.
pub fn decode_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) | Err(_) => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Decode the columns endpoint's payload into a schema.
///
/// `filename` and `sheet_name` are what was requested; the payload's own
/// values win when present so the schema reflects how the backend actually
/// resolved the lookup.
pub fn decode_schema(payload: &Value, filename: &str, sheet_name: &str) -> SheetSchema {
    let mut columns = Vec::new();
    for (position, item) in decode_list(payload.get("columns")).iter().enumerate() {
        match decode_column(item, position) {
            Some(column) => columns.push(column),
            None => warn!(position, "dropping column with no usable name"),
        }
    }
    SheetSchema {
        filename: non_empty_string(payload.get("filename")).unwrap_or_else(|| filename.to_string()),
        sheet_name: non_empty_string(payload.get("sheet_name"))
            .unwrap_or_else(|| sheet_name.to_string()),
        columns,
    }
}

/// Decode the data endpoint's payload into a page.
///
/// Rows without a usable `_row_id` are dropped with a warning; `total_rows`
/// keeps the backend's count when sent, so callers can tell when decoding
/// lost rows.
pub fn decode_sheet_page(payload: &Value) -> SheetPage {
    let headers: Vec<String> = decode_list(payload.get("headers"))
        .iter()
        .filter_map(scalar_string)
        .collect();
    let mut rows = Vec::new();
    for item in decode_list(payload.get("data")) {
        let Some(map) = item.as_object() else {
            warn!("dropping non-object entry from data payload");
            continue;
        };
        let Some(id) = map.get("_row_id").and_then(decode_row_id) else {
            warn!("dropping row with no usable _row_id");
            continue;
        };
        let cells = map
            .iter()
            .filter(|(key, _)| key.as_str() != "_row_id")
            .map(|(key, value)| (key.clone(), decode_cell(value)))
            .collect();
        rows.push(PersistedRow { id, cells });
    }
    let total_rows = payload
        .get("total_rows")
        .and_then(Value::as_u64)
        .map(|count| count as usize)
        .unwrap_or(rows.len());
    SheetPage {
        headers,
        rows,
        total_rows,
    }
}

/// Decode one cell. Scalars map directly; a structured value that sneaks
/// through is kept as its JSON text rather than lost.
pub fn decode_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(flag) => CellValue::Bool(*flag),
        Value::Number(number) => CellValue::Number(number.as_f64().unwrap_or_default()),
        Value::String(text) => CellValue::Text(text.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

fn decode_column(item: &Value, position: usize) -> Option<ColumnDef> {
    let map = item.as_object()?;
    let name = map.get("name").and_then(Value::as_str)?.trim();
    if name.is_empty() {
        return None;
    }
    let index = map
        .get("index")
        .and_then(Value::as_u64)
        .map(|value| value as usize)
        .unwrap_or(position + 1);
    let data_type = map
        .get("data_type")
        .and_then(Value::as_str)
        .and_then(DataType::parse);
    let field_type = map
        .get("field_type")
        .and_then(Value::as_str)
        .map(FieldType::parse)
        .unwrap_or(FieldType::Text);
    let required = map.get("required").and_then(Value::as_bool).unwrap_or(false);
    let sample_values = decode_list(map.get("sample_values"))
        .iter()
        .filter_map(scalar_string)
        .collect();
    Some(ColumnDef {
        index,
        name: name.to_string(),
        data_type,
        field_type,
        required,
        sample_values,
    })
}

fn decode_row_id(value: &Value) -> Option<RowId> {
    match value {
        Value::Number(number) => number.as_i64().map(RowId::new),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
