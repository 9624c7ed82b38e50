use std::collections::HashMap;

use crate::error::Result;
use crate::range::CellCoord;

/// Minimal read/write contract every grid store offers.
///
/// Coordinates are signed so that out-of-range input is reported as
/// [`SheetError::InvalidCoordinate`](crate::SheetError::InvalidCoordinate)
/// instead of being silently wrapped. Cells that were never written read as
/// `0.0`.
pub trait Sheet {
    /// Get the number at the given cell (`0.0` if the cell was never written)
    fn get(&self, row: i64, col: i64) -> Result<f64>;

    /// Store a number at the given cell, growing the bounding box if needed
    fn set(&mut self, row: i64, col: i64, value: f64) -> Result<()>;

    /// True iff the cell has never been the target of `set`
    fn is_empty(&self, row: i64, col: i64) -> Result<bool>;

    /// 1 + highest column ever written, 0 for a fresh sheet
    fn width(&self) -> usize;

    /// 1 + highest row ever written, 0 for a fresh sheet
    fn height(&self) -> usize;
}

/// A sheet with sparse storage - only written cells are kept
#[derive(Debug, Clone, Default)]
pub struct SparseSheet {
    cells: HashMap<CellCoord, f64>,
    width: usize,
    height: usize,
}

impl SparseSheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of explicitly written cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Sheet for SparseSheet {
    fn get(&self, row: i64, col: i64) -> Result<f64> {
        let coord = CellCoord::try_new(row, col)?;
        Ok(self.cells.get(&coord).copied().unwrap_or(0.0))
    }

    fn set(&mut self, row: i64, col: i64, value: f64) -> Result<()> {
        let coord = CellCoord::try_new(row, col)?;
        self.cells.insert(coord, value);

        // Bounding box only ever grows
        self.height = self.height.max(coord.row as usize + 1);
        self.width = self.width.max(coord.col as usize + 1);
        Ok(())
    }

    fn is_empty(&self, row: i64, col: i64) -> Result<bool> {
        let coord = CellCoord::try_new(row, col)?;
        Ok(!self.cells.contains_key(&coord))
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}
