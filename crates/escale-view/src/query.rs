//! Sort and search state over a fetched page.

use escale_model::{PersistedRow, SheetPage};

use crate::order::compare_display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort, when any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: Direction,
}

/// Ephemeral view state: which column sorts the table and what the search
/// box holds. The two are independent; neither touches the page itself, so
/// dropping state always restores backend order.
#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    sort: Option<SortKey>,
    search: String,
}

impl TableQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header-click semantics: a new column sorts ascending, the same
    /// column again flips direction.
    pub fn toggle_sort(&mut self, column: &str) {
        match &mut self.sort {
            Some(key) if key.column == column => key.direction = key.direction.flipped(),
            _ => {
                self.sort = Some(SortKey {
                    column: column.to_string(),
                    direction: Direction::Ascending,
                });
            }
        }
    }

    /// Set an explicit sort, replacing whatever was active.
    pub fn set_sort(&mut self, column: &str, direction: Direction) {
        self.sort = Some(SortKey {
            column: column.to_string(),
            direction,
        });
    }

    pub fn sort(&self) -> Option<&SortKey> {
        self.sort.as_ref()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Drop both sort and search at once.
    pub fn reset(&mut self) {
        self.sort = None;
        self.search.clear();
    }

    /// Project the page through the current state: filter first, then a
    /// stable sort. Equal keys keep backend order in both directions.
    pub fn apply<'a>(&self, page: &'a SheetPage) -> Vec<&'a PersistedRow> {
        let mut rows: Vec<&PersistedRow> = page.rows.iter().collect();
        let term = self.search.trim().to_lowercase();
        if !term.is_empty() {
            rows.retain(|row| {
                row.cells
                    .values()
                    .any(|cell| cell.display().to_lowercase().contains(&term))
            });
        }
        if let Some(key) = &self.sort {
            rows.sort_by(|a, b| {
                let ordering =
                    compare_display(&a.display_value(&key.column), &b.display_value(&key.column));
                match key.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }
}
