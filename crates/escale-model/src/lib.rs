pub mod column;
pub mod table;

pub use column::{ColumnDef, DataType, FieldType, SheetSchema};
pub use table::{CellValue, DraftRow, PersistedRow, RowId, SheetPage};

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> SheetSchema {
        SheetSchema {
            filename: "escales_2026.xlsx".to_string(),
            sheet_name: "Janvier".to_string(),
            columns: vec![
                ColumnDef {
                    index: 1,
                    name: "Navire".to_string(),
                    data_type: Some(DataType::TextOnly),
                    field_type: FieldType::Text,
                    required: true,
                    sample_values: vec!["MV Atlas".to_string()],
                },
                ColumnDef {
                    index: 2,
                    name: "Tonnage".to_string(),
                    data_type: Some(DataType::Number),
                    field_type: FieldType::Number,
                    required: false,
                    sample_values: vec![],
                },
            ],
        }
    }

    #[test]
    fn draft_starts_blank_and_tracks_edits() {
        let mut draft = DraftRow::empty(&schema());
        assert!(draft.is_blank());
        assert_eq!(draft.get("Navire"), "");

        draft.set("Navire", "MV Atlas");
        assert!(!draft.is_blank());
        assert_eq!(draft.get("Navire"), "MV Atlas");

        draft.set("Navire", "   ");
        assert!(draft.is_blank());
    }

    #[test]
    fn page_finds_rows_by_id() {
        let page = SheetPage {
            headers: vec!["Navire".to_string()],
            rows: vec![PersistedRow {
                id: RowId::new(2),
                cells: [("Navire".to_string(), CellValue::from("MV Atlas"))].into(),
            }],
            total_rows: 1,
        };
        assert!(page.find_row(RowId::new(2)).is_some());
        assert!(page.find_row(RowId::new(3)).is_none());
        assert_eq!(page.rows[0].display_value("Navire"), "MV Atlas");
        assert_eq!(page.rows[0].display_value("Tonnage"), "");
    }
}
