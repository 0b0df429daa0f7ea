//! Cell coordinates within a worksheet.

use serde::{Deserialize, Serialize};

/// Identifies a cell by zero-based column `x` and row `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    /// Column index (0-based)
    pub x: usize,
    /// Row index (0-based)
    pub y: usize,
}

impl CellRef {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The cell immediately to the left, if any.
    pub fn left(&self) -> Option<CellRef> {
        self.x.checked_sub(1).map(|x| CellRef::new(x, self.y))
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", col_to_letters(self.x), self.y + 1)
    }
}

/// A rectangular range of cells, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Create a new range, normalizing so start <= end on both axes.
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start: CellRef::new(a.x.min(b.x), a.y.min(b.y)),
            end: CellRef::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn single(cell: CellRef) -> Self {
        Self { start: cell, end: cell }
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.x >= self.start.x && cell.x <= self.end.x && cell.y >= self.start.y && cell.y <= self.end.y
    }

    /// Iterate over all cells in this range (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = CellRef> {
        let (x0, x1) = (self.start.x, self.end.x);
        (self.start.y..=self.end.y).flat_map(move |y| (x0..=x1).map(move |x| CellRef::new(x, y)))
    }
}

/// Convert 0-based column index to Excel-style letter(s).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}
