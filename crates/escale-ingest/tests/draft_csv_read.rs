//! Unit tests for CSV draft loading.

use std::fs;
use std::path::PathBuf;

use escale_ingest::{IngestError, read_draft_csv};
use escale_model::{ColumnDef, DataType, FieldType, SheetSchema};

fn make_column(name: &str, data_type: DataType, field_type: FieldType) -> ColumnDef {
    ColumnDef {
        index: 0,
        name: name.to_string(),
        data_type: Some(data_type),
        field_type,
        required: false,
        sample_values: vec![],
    }
}

fn make_schema() -> SheetSchema {
    SheetSchema {
        filename: "escales_2026.xlsx".to_string(),
        sheet_name: "Janvier".to_string(),
        columns: vec![
            make_column("Navire", DataType::TextOnly, FieldType::Text),
            make_column("Tonnage", DataType::Number, FieldType::Number),
            make_column("Date B/L", DataType::Date, FieldType::DatetimeLocal),
        ],
    }
}

fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("drafts.csv");
    fs::write(&path, contents).expect("write csv");
    (dir, path)
}

#[test]
fn test_matches_headers_loosely_and_skips_blank_rows() {
    let (_dir, path) = write_csv(
        "\u{feff}navire,TONNAGE,date  b/l\nMV Atlas,1200,2026-01-15\n , , \nBow Cecil,,\n",
    );
    let drafts = read_draft_csv(&path, &make_schema(), 10).expect("read drafts");
    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].get("Navire"), "MV Atlas");
    assert_eq!(drafts[0].get("Tonnage"), "1200");
    assert_eq!(drafts[0].get("Date B/L"), "2026-01-15");
    assert_eq!(drafts[1].get("Navire"), "Bow Cecil");
    assert_eq!(drafts[1].get("Tonnage"), "");
}

#[test]
fn test_short_records_leave_remaining_columns_blank() {
    let (_dir, path) = write_csv("Navire,Tonnage\nMV Atlas\n");
    let drafts = read_draft_csv(&path, &make_schema(), 10).expect("read drafts");
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].get("Navire"), "MV Atlas");
    assert_eq!(drafts[0].get("Tonnage"), "");
}

#[test]
fn test_unknown_header_is_an_error() {
    let (_dir, path) = write_csv("Navire,Cargaison\nMV Atlas,vrac\n");
    let err = read_draft_csv(&path, &make_schema(), 10).unwrap_err();
    assert!(matches!(
        err,
        IngestError::UnknownCsvColumn { column } if column == "Cargaison"
    ));
}

#[test]
fn test_row_cap_is_enforced() {
    let (_dir, path) = write_csv("Navire\nA1\nB2\nC3\n");
    let err = read_draft_csv(&path, &make_schema(), 2).unwrap_err();
    assert!(matches!(
        err,
        IngestError::TooManyRows { found: 3, limit: 2 }
    ));
}

#[test]
fn test_missing_file_reports_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let err = read_draft_csv(&path, &make_schema(), 10).unwrap_err();
    assert!(matches!(err, IngestError::CsvRead { .. }));
    assert!(err.to_string().contains("absent.csv"));
}
