//! Terminal table rendering with `comfy-table`.
//!
//! Every command that prints tabular output builds its table here so the
//! styling stays uniform: condensed UTF-8 borders, cyan bold headers, dim
//! grey for absent values.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use escale_model::{DraftRow, PersistedRow, SheetSchema};
use escale_validate::{ColumnProfile, ErrorMap};

/// Longest rendered cell in a data table before clipping.
pub const CELL_CLIP: usize = 30;

/// Number of columns the `view` table shows unless told otherwise.
pub const DEFAULT_COLUMNS: usize = 8;

/// Clip a value for table display, marking the cut with an ellipsis.
#[must_use]
pub fn clip(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        value.to_string()
    } else {
        let kept: String = value.chars().take(max_chars).collect();
        format!("{kept}...")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// The `schema` command table: one row per column definition, with an
/// extra "Observed" column when profiles were inferred from the data.
#[must_use]
pub fn schema_table(schema: &SheetSchema, profiles: Option<&[ColumnProfile]>) -> Table {
    let mut table = Table::new();
    let mut headers = vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Input"),
        header_cell("Required"),
        header_cell("Samples"),
    ];
    if profiles.is_some() {
        headers.push(header_cell("Observed"));
    }
    table.set_header(headers);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for (position, column) in schema.columns.iter().enumerate() {
        let mut row = vec![
            Cell::new(column.index),
            Cell::new(&column.name).add_attribute(Attribute::Bold),
            match column.data_type {
                Some(data_type) => Cell::new(data_type),
                None => dim_cell("-"),
            },
            Cell::new(column.field_type),
            if column.required {
                Cell::new("yes").fg(Color::Yellow)
            } else {
                dim_cell("no")
            },
            samples_cell(&column.sample_values),
        ];
        if let Some(profiles) = profiles {
            row.push(match profiles.get(position) {
                Some(profile) => {
                    Cell::new(format!("{} ({})", profile.data_type, profile.field_type))
                }
                None => dim_cell("-"),
            });
        }
        table.add_row(row);
    }
    table
}

fn samples_cell(samples: &[String]) -> Cell {
    if samples.is_empty() {
        return dim_cell("-");
    }
    let joined = samples
        .iter()
        .map(|sample| clip(sample, 20))
        .collect::<Vec<_>>()
        .join(", ");
    Cell::new(clip(&joined, 60))
}

/// The `view` command table: backend row id first, then up to
/// `max_columns` sheet columns in header order.
#[must_use]
pub fn page_table(headers: &[String], rows: &[&PersistedRow], max_columns: usize) -> Table {
    let visible: Vec<&String> = headers.iter().take(max_columns).collect();
    let mut table = Table::new();
    let mut header_row = vec![header_cell("Row")];
    header_row.extend(visible.iter().map(|name| header_cell(name)));
    table.set_header(header_row);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for row in rows {
        let mut cells = vec![dim_cell(row.id)];
        for name in &visible {
            let value = row.display_value(name);
            if value.is_empty() {
                cells.push(dim_cell(""));
            } else {
                cells.push(Cell::new(clip(&value, CELL_CLIP)));
            }
        }
        table.add_row(cells);
    }
    table
}

/// Flat listing of failing cells: 1-based draft row, column name, the
/// offending value and the validation message.
#[must_use]
pub fn issue_rows(errors: &ErrorMap, drafts: &[DraftRow]) -> Vec<[String; 4]> {
    errors
        .iter()
        .map(|(row, column, error)| {
            let value = drafts.get(row).map_or("", |draft| draft.get(column));
            [
                (row + 1).to_string(),
                column.to_string(),
                clip(value, CELL_CLIP),
                error.to_string(),
            ]
        })
        .collect()
}

/// The table printed when validation blocks a submit.
#[must_use]
pub fn issue_table(errors: &ErrorMap, drafts: &[DraftRow]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Column"),
        header_cell("Value"),
        header_cell("Problem"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for [row, column, value, problem] in issue_rows(errors, drafts) {
        table.add_row(vec![
            Cell::new(row),
            Cell::new(column).add_attribute(Attribute::Bold),
            Cell::new(value),
            Cell::new(problem).fg(Color::Red),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_values_untouched() {
        assert_eq!(clip("MV Atlas", 30), "MV Atlas");
        assert_eq!(clip("", 30), "");
    }

    #[test]
    fn clip_marks_the_cut_with_an_ellipsis() {
        let long = "a very long observation that keeps going";
        assert_eq!(clip(long, 10), "a very lon...");
    }

    #[test]
    fn clip_counts_characters_not_bytes() {
        assert_eq!(clip("ééééé", 3), "ééé...");
    }
}
