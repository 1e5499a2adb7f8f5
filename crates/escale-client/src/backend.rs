//! The backend surface the entry and view layers talk to.

use std::collections::BTreeMap;

use escale_model::{RowId, SheetPage, SheetSchema};

use crate::error::Result;

/// One sheet's worth of backend operations.
///
/// [`HttpBackend`](crate::HttpBackend) implements this against the REST
/// API; tests substitute an in-memory fake.
pub trait SheetBackend {
    /// Fetch the column definitions of a sheet.
    fn fetch_schema(&self, filename: &str, sheet_name: &str) -> Result<SheetSchema>;

    /// Fetch the persisted rows of a sheet.
    fn fetch_page(&self, filename: &str, sheet_name: &str) -> Result<SheetPage>;

    /// Append one row to a sheet.
    fn create_row(
        &self,
        filename: &str,
        sheet_name: &str,
        cells: &BTreeMap<String, String>,
    ) -> Result<()>;

    /// Overwrite one existing row.
    fn update_row(
        &self,
        filename: &str,
        sheet_name: &str,
        id: RowId,
        cells: &BTreeMap<String, String>,
    ) -> Result<()>;

    /// Delete one row.
    fn delete_row(&self, filename: &str, sheet_name: &str, id: RowId) -> Result<()>;

    /// Download the whole workbook as stored on the server.
    fn download(&self, filename: &str) -> Result<Vec<u8>>;
}
