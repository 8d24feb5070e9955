//! In-process [`SheetService`] for tests
//!
//! Compiled for this crate's own tests and, behind the `testing` feature, for
//! integration tests and downstream crates.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::SheetResult;
use crate::service::SheetService;
use crate::types::{CellRange, CellUpdate, ColumnLetter, UpdateResponse};

/// In-process sheet keyed by (column, row).
///
/// Every `update_cells` call is recorded in [`MemorySheet::batches`], including
/// empty ones, so callers can assert on what would have gone over the wire.
#[derive(Debug, Default)]
pub struct MemorySheet {
    id: String,
    cells: RefCell<BTreeMap<(ColumnLetter, u32), String>>,
    batches: RefCell<Vec<Vec<CellUpdate>>>,
}

impl MemorySheet {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Fill `column` downwards from `start_row`.
    pub fn with_column<S: AsRef<str>>(self, column: ColumnLetter, start_row: u32, values: &[S]) -> Self {
        {
            let mut cells = self.cells.borrow_mut();
            for (row, value) in (start_row..).zip(values) {
                cells.insert((column, row), value.as_ref().to_string());
            }
        }
        self
    }

    pub fn set(&self, column: ColumnLetter, row: u32, value: impl Into<String>) {
        self.cells.borrow_mut().insert((column, row), value.into());
    }

    pub fn get(&self, column: ColumnLetter, row: u32) -> Option<String> {
        self.cells.borrow().get(&(column, row)).cloned()
    }

    /// Every batch submitted so far, oldest first.
    pub fn batches(&self) -> Vec<Vec<CellUpdate>> {
        self.batches.borrow().clone()
    }
}

impl SheetService for MemorySheet {
    fn col_values(&self, column: ColumnLetter) -> SheetResult<Vec<String>> {
        let cells = self.cells.borrow();
        let last_row = cells
            .iter()
            .filter(|((col, _), value)| *col == column && !value.is_empty())
            .map(|((_, row), _)| *row)
            .max()
            .unwrap_or(0);

        Ok((1..=last_row)
            .map(|row| cells.get(&(column, row)).cloned().unwrap_or_default())
            .collect())
    }

    fn range_values(&self, range: &CellRange) -> SheetResult<Vec<String>> {
        let cells = self.cells.borrow();
        Ok(range
            .rows()
            .map(|row| cells.get(&(range.column, row)).cloned().unwrap_or_default())
            .collect())
    }

    fn update_cells(&self, updates: &[CellUpdate]) -> SheetResult<UpdateResponse> {
        let mut cells = self.cells.borrow_mut();
        let mut rows = Vec::new();
        let mut columns = Vec::new();
        for update in updates {
            cells.insert((update.column, update.row), update.value.clone());
            rows.push(update.row);
            columns.push(update.column);
        }
        rows.sort_unstable();
        rows.dedup();
        columns.sort_unstable();
        columns.dedup();
        self.batches.borrow_mut().push(updates.to_vec());

        Ok(UpdateResponse {
            spreadsheet_id: self.id.clone(),
            total_updated_rows: rows.len() as u32,
            total_updated_columns: columns.len() as u32,
            total_updated_cells: updates.len() as u32,
            total_updated_sheets: u32::from(!updates.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(s: &str) -> ColumnLetter {
        s.parse().unwrap()
    }

    #[test]
    fn test_col_values_stops_at_last_populated_row() {
        let sheet = MemorySheet::new("s").with_column(col("A"), 1, &["h1", "", "h3", "x"]);
        sheet.set(col("A"), 6, "");
        assert_eq!(sheet.col_values(col("A")).unwrap(), vec!["h1", "", "h3", "x"]);
        assert!(sheet.col_values(col("B")).unwrap().is_empty());
    }

    #[test]
    fn test_range_values_pads_blanks() {
        let sheet = MemorySheet::new("s").with_column(col("C"), 6, &["a"]);
        let range = CellRange::new(col("C"), 6, 8).unwrap();
        assert_eq!(sheet.range_values(&range).unwrap(), vec!["a", "", ""]);
    }

    #[test]
    fn test_update_cells_records_batch() {
        let sheet = MemorySheet::new("sheet-1");
        let resp = sheet
            .update_cells(&[
                CellUpdate::new(6, col("D"), "1"),
                CellUpdate::new(7, col("D"), "0"),
            ])
            .unwrap();
        assert_eq!(resp.spreadsheet_id, "sheet-1");
        assert_eq!(resp.total_updated_cells, 2);
        assert_eq!(resp.total_updated_rows, 2);
        assert_eq!(resp.total_updated_columns, 1);
        assert_eq!(sheet.get(col("D"), 7).as_deref(), Some("0"));
        assert_eq!(sheet.batches().len(), 1);
    }

    #[test]
    fn test_empty_batch_is_recorded() {
        let sheet = MemorySheet::new("s");
        let resp = sheet.update_cells(&[]).unwrap();
        assert_eq!(resp.total_updated_cells, 0);
        assert_eq!(resp.total_updated_sheets, 0);
        assert_eq!(sheet.batches(), vec![Vec::<CellUpdate>::new()]);
    }
}
