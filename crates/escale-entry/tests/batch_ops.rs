//! Batch manipulation: capacity, removal, duplication, cell edits.

use std::collections::BTreeMap;

use escale_entry::{EntryBatch, EntryError, EntryMode, MAX_ROWS};
use escale_model::{CellValue, ColumnDef, DataType, FieldType, PersistedRow, RowId, SheetSchema};
use escale_validate::CellError;

fn make_column(index: usize, name: &str, data_type: Option<DataType>) -> ColumnDef {
    ColumnDef {
        index,
        name: name.to_string(),
        data_type,
        field_type: FieldType::Text,
        required: false,
        sample_values: vec![],
    }
}

fn make_schema() -> SheetSchema {
    SheetSchema {
        filename: "port.xlsx".to_string(),
        sheet_name: "Escales".to_string(),
        columns: vec![
            make_column(1, "Navire", Some(DataType::TextOnly)),
            make_column(2, "Tonnage", Some(DataType::Number)),
            make_column(3, "Observations", Some(DataType::Any)),
        ],
    }
}

#[test]
fn test_new_batch_has_one_empty_row() {
    let batch = EntryBatch::new(make_schema());
    assert_eq!(batch.rows().len(), 1);
    assert!(batch.rows()[0].is_blank());
    assert_eq!(batch.mode(), EntryMode::Create);
    assert!(batch.errors().is_empty());
}

#[test]
fn test_initialize_rows_clamps_to_bounds() {
    let mut batch = EntryBatch::new(make_schema());
    batch.initialize_rows(0);
    assert_eq!(batch.rows().len(), 1);
    batch.initialize_rows(25);
    assert_eq!(batch.rows().len(), MAX_ROWS);
    batch.initialize_rows(4);
    assert_eq!(batch.rows().len(), 4);
}

#[test]
fn test_add_row_caps_at_the_maximum() {
    let mut batch = EntryBatch::new(make_schema());
    for _ in 1..MAX_ROWS {
        batch.add_row().unwrap();
    }
    assert_eq!(batch.rows().len(), MAX_ROWS);

    let err = batch.add_row().unwrap_err();
    assert!(matches!(err, EntryError::BatchFull { max: MAX_ROWS }));
    assert_eq!(batch.rows().len(), MAX_ROWS);
}

#[test]
fn test_remove_row_keeps_at_least_one() {
    let mut batch = EntryBatch::new(make_schema());
    batch.remove_row(0);
    assert_eq!(batch.rows().len(), 1);

    batch.add_row().unwrap();
    batch.remove_row(5);
    assert_eq!(batch.rows().len(), 2);
    batch.remove_row(1);
    assert_eq!(batch.rows().len(), 1);
}

#[test]
fn test_remove_row_reindexes_errors() {
    let mut batch = EntryBatch::new(make_schema());
    batch.add_row().unwrap();
    batch.add_row().unwrap();
    batch.set_cell(0, "Navire", "4512").unwrap();
    batch.set_cell(2, "Tonnage", "heavy").unwrap();
    assert_eq!(batch.errors().len(), 2);

    batch.remove_row(0);
    assert_eq!(batch.errors().len(), 1);
    assert_eq!(batch.errors().get(1, "Tonnage"), Some(CellError::NotANumber));
}

#[test]
fn test_duplicate_row_copies_values() {
    let mut batch = EntryBatch::new(make_schema());
    batch.set_cell(0, "Navire", "Atlas").unwrap();
    batch.duplicate_row(0).unwrap();
    assert_eq!(batch.rows().len(), 2);
    assert_eq!(batch.cell(1, "Navire"), "Atlas");

    assert!(matches!(
        batch.duplicate_row(9),
        Err(EntryError::RowOutOfRange { .. })
    ));
}

#[test]
fn test_duplicate_row_respects_capacity() {
    let mut batch = EntryBatch::new(make_schema());
    for _ in 1..MAX_ROWS {
        batch.add_row().unwrap();
    }
    assert!(matches!(
        batch.duplicate_row(0),
        Err(EntryError::BatchFull { .. })
    ));
}

#[test]
fn test_set_cell_validates_incrementally() {
    let mut batch = EntryBatch::new(make_schema());
    batch.set_cell(0, "Tonnage", "12t").unwrap();
    assert_eq!(batch.errors().get(0, "Tonnage"), Some(CellError::NotANumber));
    assert_eq!(batch.cell(0, "Tonnage"), "12t");

    batch.set_cell(0, "Tonnage", "1200,5").unwrap();
    assert!(batch.errors().is_empty());

    // Clearing a cell clears its error too.
    batch.set_cell(0, "Navire", "4512").unwrap();
    batch.set_cell(0, "Navire", "").unwrap();
    assert!(batch.errors().is_empty());
}

#[test]
fn test_set_cell_rejects_unknown_targets() {
    let mut batch = EntryBatch::new(make_schema());
    assert!(matches!(
        batch.set_cell(0, "Pavillon", "x"),
        Err(EntryError::UnknownColumn { .. })
    ));
    assert!(matches!(
        batch.set_cell(3, "Navire", "x"),
        Err(EntryError::RowOutOfRange { .. })
    ));
}

#[test]
fn test_fixing_a_digits_only_name_clears_the_batch() {
    let mut batch = EntryBatch::new(make_schema());
    batch.set_cell(0, "Navire", "123").unwrap();
    batch.set_cell(0, "Tonnage", "45").unwrap();
    assert_eq!(batch.errors().get(0, "Navire"), Some(CellError::DigitsOnly));
    assert_eq!(batch.errors().get(0, "Tonnage"), None);

    batch.set_cell(0, "Navire", "MV Atlas").unwrap();
    assert!(batch.validate_all());
}

#[test]
fn test_validate_all_rebuilds_the_map() {
    let mut batch = EntryBatch::new(make_schema());
    batch.initialize_rows(2);
    batch.set_cell(0, "Navire", "Atlas").unwrap();
    batch.set_cell(1, "Navire", "4512").unwrap();
    assert!(!batch.validate_all());
    assert_eq!(batch.errors().len(), 1);
    assert_eq!(batch.errors().get(1, "Navire"), Some(CellError::DigitsOnly));

    batch.set_cell(1, "Navire", "Grand Large").unwrap();
    assert!(batch.validate_all());
    assert!(batch.errors().is_empty());
}

#[test]
fn test_begin_edit_seeds_from_persisted_row() {
    let mut batch = EntryBatch::new(make_schema());
    let row = PersistedRow {
        id: RowId::new(6),
        cells: BTreeMap::from([
            ("Navire".to_string(), CellValue::Text("Atlas".to_string())),
            ("Tonnage".to_string(), CellValue::Number(45.0)),
        ]),
    };
    batch.begin_edit(&row);
    assert_eq!(batch.mode(), EntryMode::Edit(RowId::new(6)));
    assert_eq!(batch.rows().len(), 1);
    assert_eq!(batch.cell(0, "Navire"), "Atlas");
    assert_eq!(batch.cell(0, "Tonnage"), "45");
    assert_eq!(batch.cell(0, "Observations"), "");

    batch.cancel_edit();
    assert_eq!(batch.mode(), EntryMode::Create);
    assert!(batch.rows()[0].is_blank());
}
