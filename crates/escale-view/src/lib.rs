mod order;
mod query;
mod shortcuts;

pub use order::{compare_display, natural_cmp};
pub use query::{Direction, SortKey, TableQuery};
pub use shortcuts::{QuickSort, available_shortcuts, find_column};
