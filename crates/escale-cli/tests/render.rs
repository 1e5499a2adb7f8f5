//! Rendering of the validation issue listing shown when a submit is blocked.

use escale_cli::render::issue_rows;
use escale_model::{ColumnDef, DataType, DraftRow, FieldType, SheetSchema};
use escale_validate::{CellError, ErrorMap};

fn make_column(index: usize, name: &str, data_type: DataType, field_type: FieldType) -> ColumnDef {
    ColumnDef {
        index,
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
            make_column(1, "Navire", DataType::TextOnly, FieldType::Text),
            make_column(2, "Tonnage", DataType::Number, FieldType::Number),
        ],
    }
}

#[test]
fn test_issue_rows_pair_errors_with_the_offending_values() {
    let schema = make_schema();
    let mut first = DraftRow::empty(&schema);
    first.set("Navire", "4512");
    let mut second = DraftRow::empty(&schema);
    second.set("Tonnage", "twelve");
    let drafts = vec![first, second];

    let mut errors = ErrorMap::new();
    errors.record(0, "Navire", CellError::DigitsOnly);
    errors.record(1, "Tonnage", CellError::NotANumber);

    let listing = issue_rows(&errors, &drafts)
        .iter()
        .map(|row| row.join(" | "))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(listing, @r"
    1 | Navire | 4512 | must contain text, not only digits
    2 | Tonnage | twelve | must be a number, not text
    ");
}

#[test]
fn test_issue_rows_clip_long_values() {
    let schema = make_schema();
    let mut draft = DraftRow::empty(&schema);
    draft.set("Navire", "1234567890123456789012345678901234567890");
    let drafts = vec![draft];

    let mut errors = ErrorMap::new();
    errors.record(0, "Navire", CellError::DigitsOnly);

    let rows = issue_rows(&errors, &drafts);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], "123456789012345678901234567890...");
}

#[test]
fn test_issue_rows_survive_a_missing_draft() {
    let mut errors = ErrorMap::new();
    errors.record(3, "Navire", CellError::DigitsOnly);

    let rows = issue_rows(&errors, &[]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], ["4", "Navire", "", "must contain text, not only digits"]);
}
