//! Unit tests for defensive payload decoding.

use serde_json::json;

use escale_ingest::{decode_cell, decode_list, decode_schema, decode_sheet_page};
use escale_model::{CellValue, DataType, FieldType, RowId};

#[test]
fn test_decode_list_accepts_arrays_and_encoded_strings() {
    let payload = json!({
        "plain": [1, 2],
        "encoded": "[\"a\", \"b\"]",
        "garbage": "not json",
        "scalar": 5,
        "object_string": "{\"k\": 1}",
    });
    assert_eq!(decode_list(payload.get("plain")).len(), 2);
    assert_eq!(decode_list(payload.get("encoded")).len(), 2);
    assert!(decode_list(payload.get("garbage")).is_empty());
    assert!(decode_list(payload.get("scalar")).is_empty());
    assert!(decode_list(payload.get("object_string")).is_empty());
    assert!(decode_list(payload.get("missing")).is_empty());
}

#[test]
fn test_decode_schema_full_payload() {
    let payload = json!({
        "filename": "escales_2026.xlsx",
        "sheet_name": "Janvier",
        "columns": [
            {
                "index": 1,
                "name": "Navire",
                "data_type": "text_only",
                "field_type": "text",
                "required": true,
                "sample_values": ["MV Atlas", 12],
            },
            {"name": " Tonnage ", "data_type": "", "field_type": "number"},
            {"name": "Mystère", "data_type": "weird", "field_type": "select-yesno"},
            {"name": "   "},
            "not an object",
        ],
    });
    let schema = decode_schema(&payload, "fallback.xlsx", "Feuil1");
    assert_eq!(schema.filename, "escales_2026.xlsx");
    assert_eq!(schema.sheet_name, "Janvier");
    assert_eq!(schema.columns.len(), 3);

    let navire = &schema.columns[0];
    assert_eq!(navire.data_type, Some(DataType::TextOnly));
    assert!(navire.required);
    assert_eq!(
        navire.sample_values,
        vec!["MV Atlas".to_string(), "12".to_string()]
    );

    let tonnage = &schema.columns[1];
    assert_eq!(tonnage.name, "Tonnage");
    assert_eq!(tonnage.data_type, None);
    assert_eq!(tonnage.field_type, FieldType::Number);
    assert_eq!(tonnage.index, 2);
    assert!(!tonnage.required);

    let mystere = &schema.columns[2];
    assert_eq!(mystere.data_type, Some(DataType::Any));
    assert_eq!(mystere.field_type, FieldType::SelectYesno);
    assert_eq!(mystere.index, 3);
}

#[test]
fn test_decode_schema_falls_back_to_requested_names() {
    let payload = json!({"columns": "[{\"name\": \"Navire\"}]"});
    let schema = decode_schema(&payload, "escales.xlsx", "Feuil1");
    assert_eq!(schema.filename, "escales.xlsx");
    assert_eq!(schema.sheet_name, "Feuil1");
    assert_eq!(schema.columns.len(), 1);
    assert_eq!(schema.columns[0].name, "Navire");
    assert_eq!(schema.columns[0].data_type, None);
    assert_eq!(schema.columns[0].field_type, FieldType::Text);
}

#[test]
fn test_decode_sheet_page_drops_unusable_rows() {
    let payload = json!({
        "headers": ["Navire", "Tonnage"],
        "data": [
            {"_row_id": 2, "Navire": "MV Atlas", "Tonnage": 1200.5, "Vide": null},
            {"_row_id": "3", "Navire": "Bow Cecil"},
            {"Navire": "sans id"},
            "not an object",
            {"_row_id": true, "Navire": "mauvais id"},
        ],
        "total_rows": 5,
    });
    let page = decode_sheet_page(&payload);
    assert_eq!(page.headers, vec!["Navire", "Tonnage"]);
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.total_rows, 5);

    let first = &page.rows[0];
    assert_eq!(first.id, RowId::new(2));
    assert_eq!(first.cells["Navire"], CellValue::Text("MV Atlas".into()));
    assert_eq!(first.cells["Tonnage"], CellValue::Number(1200.5));
    assert_eq!(first.cells["Vide"], CellValue::Missing);
    assert!(!first.cells.contains_key("_row_id"));

    assert_eq!(page.rows[1].id, RowId::new(3));
}

#[test]
fn test_decode_sheet_page_with_string_encoded_lists() {
    let payload = json!({
        "headers": "[\"Navire\"]",
        "data": "[{\"_row_id\": 4, \"Navire\": \"MV Atlas\"}]",
    });
    let page = decode_sheet_page(&payload);
    assert_eq!(page.headers, vec!["Navire"]);
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.total_rows, 1);
}

#[test]
fn test_decode_cell_scalars() {
    assert_eq!(decode_cell(&json!(null)), CellValue::Missing);
    assert_eq!(decode_cell(&json!(true)), CellValue::Bool(true));
    assert_eq!(decode_cell(&json!(45)), CellValue::Number(45.0));
    assert_eq!(decode_cell(&json!(45.5)), CellValue::Number(45.5));
    assert_eq!(decode_cell(&json!("texte")), CellValue::Text("texte".into()));
    assert_eq!(decode_cell(&json!([1])), CellValue::Text("[1]".into()));
}
