//! The remote spreadsheet as seen by [`ProfileSheet`](crate::sheet::ProfileSheet)
//!
//! [`SheetService`] is the seam between the alignment logic and whatever holds
//! the cells. [`GoogleSheetsClient`](crate::google::GoogleSheetsClient) talks to
//! the Sheets API.

use crate::error::SheetResult;
use crate::types::{CellRange, CellUpdate, ColumnLetter, UpdateResponse};

/// Operations ProfileSheet needs from one spreadsheet tab.
pub trait SheetService {
    /// Values of `column` from row 1 through its last non-empty cell.
    fn col_values(&self, column: ColumnLetter) -> SheetResult<Vec<String>>;

    /// Exactly `range.row_count()` values, blank cells as `""`.
    fn range_values(&self, range: &CellRange) -> SheetResult<Vec<String>>;

    /// Apply all `cells` in one submission.
    fn update_cells(&self, cells: &[CellUpdate]) -> SheetResult<UpdateResponse>;
}

impl<T: SheetService + ?Sized> SheetService for Box<T> {
    fn col_values(&self, column: ColumnLetter) -> SheetResult<Vec<String>> {
        (**self).col_values(column)
    }

    fn range_values(&self, range: &CellRange) -> SheetResult<Vec<String>> {
        (**self).range_values(range)
    }

    fn update_cells(&self, cells: &[CellUpdate]) -> SheetResult<UpdateResponse> {
        (**self).update_cells(cells)
    }
}
