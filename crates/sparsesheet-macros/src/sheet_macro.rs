use sparsesheet_core::{CellCoord, CellRange, Result, Sheet, SheetError};

/// Type alias for boxed macros
pub type MacroBox = Box<dyn SheetMacro>;

/// A pre-validated bulk operation over a rectangle of cells.
///
/// Macros hold no reference to a sheet; the sheet is handed in on every
/// `apply`, and only its public `get`/`set` contract is used. Applying the
/// same macro to two sheets in the same starting state has the same effect.
pub trait SheetMacro: std::fmt::Debug + Send + Sync {
    /// Run the macro against the given sheet
    fn apply(&self, sheet: &mut dyn Sheet) -> Result<()>;

    /// The source rectangle this macro covers
    fn range(&self) -> CellRange;

    /// Get a description of this macro (for logs and UI display)
    fn description(&self) -> &str;
}

fn signed(coord: CellCoord) -> (i64, i64) {
    (i64::from(coord.row), i64::from(coord.col))
}

/// Assign one value to every cell in a range
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAssignMacro {
    range: CellRange,
    value: f64,
}

impl BulkAssignMacro {
    pub fn new(from_row: i64, from_col: i64, to_row: i64, to_col: i64, value: f64) -> Result<Self> {
        Ok(Self {
            range: CellRange::from_bounds(from_row, from_col, to_row, to_col)?,
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl SheetMacro for BulkAssignMacro {
    fn apply(&self, sheet: &mut dyn Sheet) -> Result<()> {
        for coord in self.range {
            let (row, col) = signed(coord);
            sheet.set(row, col, self.value)?;
        }
        Ok(())
    }

    fn range(&self) -> CellRange {
        self.range
    }

    fn description(&self) -> &str {
        "Bulk assign"
    }
}

/// Fill a range with an arithmetic sequence, row by row
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAssignMacro {
    range: CellRange,
    start_value: f64,
    increment: f64,
}

impl RangeAssignMacro {
    pub fn new(
        from_row: i64,
        from_col: i64,
        to_row: i64,
        to_col: i64,
        start_value: f64,
        increment: f64,
    ) -> Result<Self> {
        Ok(Self {
            range: CellRange::from_bounds(from_row, from_col, to_row, to_col)?,
            start_value,
            increment,
        })
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }
}

impl SheetMacro for RangeAssignMacro {
    fn apply(&self, sheet: &mut dyn Sheet) -> Result<()> {
        // Sequence position follows row-major order
        let mut current = self.start_value;
        for coord in self.range {
            let (row, col) = signed(coord);
            sheet.set(row, col, current)?;
            current += self.increment;
        }
        Ok(())
    }

    fn range(&self) -> CellRange {
        self.range
    }

    fn description(&self) -> &str {
        "Range assign"
    }
}

/// Store the mean of a range in a cell outside that range.
///
/// Unwritten cells count as `0.0` and the divisor is always the full cell
/// count of the rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageMacro {
    range: CellRange,
    dest: CellCoord,
}

impl AverageMacro {
    pub fn new(
        from_row: i64,
        from_col: i64,
        to_row: i64,
        to_col: i64,
        dest_row: i64,
        dest_col: i64,
    ) -> Result<Self> {
        let range = CellRange::from_bounds(from_row, from_col, to_row, to_col)?;
        let dest = CellCoord::try_new(dest_row, dest_col).map_err(|_| {
            SheetError::InvalidRange(format!(
                "destination ({},{}) cannot be negative",
                dest_row, dest_col
            ))
        })?;

        if range.contains(dest) {
            return Err(SheetError::InvalidRange(format!(
                "destination ({},{}) cannot overlap with source range {}",
                dest.row, dest.col, range
            )));
        }

        Ok(Self { range, dest })
    }

    pub fn dest(&self) -> CellCoord {
        self.dest
    }
}

impl SheetMacro for AverageMacro {
    fn apply(&self, sheet: &mut dyn Sheet) -> Result<()> {
        let mut sum = 0.0;
        for coord in self.range {
            let (row, col) = signed(coord);
            sum += sheet.get(row, col)?;
        }

        let average = sum / self.range.cell_count() as f64;
        let (row, col) = signed(self.dest);
        sheet.set(row, col, average)
    }

    fn range(&self) -> CellRange {
        self.range
    }

    fn description(&self) -> &str {
        "Average"
    }
}
