use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SheetError};

/// Cell coordinate (0-indexed internally)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        CellCoord { row, col }
    }

    /// Validate signed indices coming from callers (e.g. the interpreter)
    pub fn try_new(row: i64, col: i64) -> Result<Self> {
        match (u32::try_from(row), u32::try_from(col)) {
            (Ok(r), Ok(c)) => Ok(CellCoord::new(r, c)),
            _ => Err(SheetError::InvalidCoordinate { row, col }),
        }
    }
}

/// Convert row label (A, B, ..., Z, AA, AB, ...) to index (0-indexed).
/// Case-insensitive; `None` for empty, non-alphabetic or overflowing labels.
pub fn row_from_label(label: &str) -> Option<u32> {
    let mut row: u32 = 0;

    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        row = row.checked_mul(26)?.checked_add(digit)?;
    }

    row.checked_sub(1)
}

/// A non-empty rectangle of cells, both corners inclusive.
///
/// Unlike a selection, a `CellRange` is never normalized: the start corner
/// must not exceed the end corner on either axis, so every value of this
/// type covers at least one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellRange {
    start: CellCoord,
    end: CellCoord,
}

impl CellRange {
    pub fn new(start: CellCoord, end: CellCoord) -> Result<Self> {
        if start.row > end.row || start.col > end.col {
            return Err(SheetError::InvalidRange(format!(
                "starting indices ({},{}) must be <= ending indices ({},{})",
                start.row, start.col, end.row, end.col
            )));
        }
        Ok(CellRange { start, end })
    }

    /// Build from signed bounds, rejecting negative or oversized indices
    pub fn from_bounds(from_row: i64, from_col: i64, to_row: i64, to_col: i64) -> Result<Self> {
        let corner = |row: i64, col: i64| {
            CellCoord::try_new(row, col).map_err(|_| {
                SheetError::InvalidRange(format!(
                    "row and column indices cannot be negative, got ({},{})",
                    row, col
                ))
            })
        };
        CellRange::new(corner(from_row, from_col)?, corner(to_row, to_col)?)
    }

    pub fn start(&self) -> CellCoord {
        self.start
    }

    pub fn end(&self) -> CellCoord {
        self.end
    }

    /// Check if a coordinate is within this range
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        u64::from(self.end.row - self.start.row) + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        u64::from(self.end.col - self.start.col) + 1
    }

    /// Get the total number of cells in the range (always >= 1).
    /// A full-span range holds 2^64 cells, so the product is widened.
    pub fn cell_count(&self) -> u128 {
        u128::from(self.row_count()) * u128::from(self.col_count())
    }

    /// Iterate over all coordinates in the range, ascending row then ascending column
    pub fn iter(&self) -> CellRangeIter {
        CellRangeIter {
            range: *self,
            next: Some(self.start),
        }
    }
}

// Deserialize through the validating constructor so inverted corners are rejected
impl<'de> Deserialize<'de> for CellRange {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RangeHelper {
            start: CellCoord,
            end: CellCoord,
        }

        let helper = RangeHelper::deserialize(deserializer)?;
        CellRange::new(helper.start, helper.end).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}) to ({},{})",
            self.start.row, self.start.col, self.end.row, self.end.col
        )
    }
}

impl IntoIterator for CellRange {
    type Item = CellCoord;
    type IntoIter = CellRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row-major iterator over coordinates in a range
pub struct CellRangeIter {
    range: CellRange,
    next: Option<CellCoord>,
}

impl Iterator for CellRangeIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let coord = self.next?;

        self.next = if coord.col < self.range.end.col {
            Some(CellCoord::new(coord.row, coord.col + 1))
        } else if coord.row < self.range.end.row {
            Some(CellCoord::new(coord.row + 1, self.range.start.col))
        } else {
            None
        };

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(coord) => {
                let rows_below = u128::from(self.range.end.row - coord.row);
                let cols_left = u128::from(self.range.end.col - coord.col) + 1;
                rows_below * u128::from(self.range.col_count()) + cols_left
            }
        };
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
