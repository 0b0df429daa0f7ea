use std::collections::{HashMap, HashSet};

use super::cell::CellValue;
use super::cell_ref::CellRef;
use super::history::EditRecord;

static EMPTY: CellValue = CellValue::Empty;

/// The data matrix behind a worksheet.
///
/// Sparse: cells that were never written read as [`CellValue::Empty`].
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    cells: HashMap<CellRef, CellValue>,
    pub cols: usize,
    pub rows: usize,
    read_only: HashSet<CellRef>,
}

impl Sheet {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            name: String::from("Sheet1"),
            cells: HashMap::new(),
            cols,
            rows,
            read_only: HashSet::new(),
        }
    }

    /// Build a sheet from row-major JSON data, as grids are usually seeded.
    pub fn from_rows(rows: &[Vec<serde_json::Value>]) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut sheet = Self::new(cols, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                let value = CellValue::from_json(value);
                if !value.is_empty() {
                    sheet.cells.insert(CellRef::new(x, y), value);
                }
            }
        }
        sheet
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    pub fn get(&self, cell: CellRef) -> &CellValue {
        self.cells.get(&cell).unwrap_or(&EMPTY)
    }

    /// Write a value and return the before/after record.
    ///
    /// Writing outside the current bounds grows the sheet.
    pub fn update(&mut self, cell: CellRef, value: CellValue) -> EditRecord {
        self.cols = self.cols.max(cell.x + 1);
        self.rows = self.rows.max(cell.y + 1);

        let old_value = if value.is_empty() {
            self.cells.remove(&cell)
        } else {
            self.cells.insert(cell, value.clone())
        }
        .unwrap_or_default();

        EditRecord { x: cell.x, y: cell.y, value, old_value }
    }

    pub fn set_read_only(&mut self, cell: CellRef, read_only: bool) {
        if read_only {
            self.read_only.insert(cell);
        } else {
            self.read_only.remove(&cell);
        }
    }

    pub fn is_read_only(&self, cell: CellRef) -> bool {
        self.read_only.contains(&cell)
    }

    /// Values of one column, top to bottom.
    pub fn column_values(&self, x: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.rows).map(move |y| self.get(CellRef::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwritten_cells_are_empty() {
        let sheet = Sheet::new(3, 3);
        assert_eq!(sheet.get(CellRef::new(2, 2)), &CellValue::Empty);
        assert!(sheet.contains(CellRef::new(2, 2)));
        assert!(!sheet.contains(CellRef::new(3, 0)));
    }

    #[test]
    fn test_update_returns_record() {
        let mut sheet = Sheet::new(2, 2);
        let first = sheet.update(CellRef::new(0, 1), CellValue::Number(7.0));
        assert_eq!(first.old_value, CellValue::Empty);
        let second = sheet.update(CellRef::new(0, 1), CellValue::Text("x".into()));
        assert_eq!(second.old_value, CellValue::Number(7.0));
        assert_eq!(second.value, CellValue::Text("x".into()));
    }

    #[test]
    fn test_update_grows_bounds() {
        let mut sheet = Sheet::new(1, 1);
        sheet.update(CellRef::new(4, 2), CellValue::Bool(true));
        assert_eq!((sheet.cols, sheet.rows), (5, 3));
    }

    #[test]
    fn test_from_rows() {
        let sheet = Sheet::from_rows(&[
            vec![json!("Short"), json!(12), json!(true)],
            vec![json!(null), json!("=A1")],
        ]);
        assert_eq!((sheet.cols, sheet.rows), (3, 2));
        assert_eq!(sheet.get(CellRef::new(1, 0)), &CellValue::Number(12.0));
        assert_eq!(sheet.get(CellRef::new(1, 1)), &CellValue::Formula("=A1".into()));
        assert_eq!(sheet.column_values(2).filter(|v| v.is_truthy()).count(), 1);
    }
}
