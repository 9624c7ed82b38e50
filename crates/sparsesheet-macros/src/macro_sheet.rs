use sparsesheet_core::{Result, Sheet, SheetError, SparseSheet};

use crate::sheet_macro::{MacroBox, SheetMacro};

/// Adds macro execution to any sheet by wrapping it.
///
/// All `Sheet` operations are forwarded unchanged. Macros run against the
/// wrapper itself, so their writes are visible through the same handle the
/// caller holds.
///
/// Macros perform multi-cell read-then-write sequences and are not atomic;
/// a shared wrapper must serialize `execute_macro` calls behind one lock.
pub struct MacroSheet<S: Sheet = SparseSheet> {
    sheet: S,
}

impl<S: Sheet> MacroSheet<S> {
    /// Wrap an existing sheet
    pub fn new(sheet: S) -> Self {
        Self { sheet }
    }

    /// Run a macro against this sheet
    pub fn execute_macro(&mut self, sheet_macro: &dyn SheetMacro) -> Result<()> {
        tracing::debug!(
            kind = sheet_macro.description(),
            range = %sheet_macro.range(),
            "executing macro"
        );
        sheet_macro.apply(self)
    }

    /// Run a macro that may not have been supplied
    pub fn execute_boxed(&mut self, sheet_macro: Option<MacroBox>) -> Result<()> {
        let sheet_macro = sheet_macro
            .ok_or_else(|| SheetError::InvalidArgument("macro cannot be absent".to_string()))?;
        self.execute_macro(sheet_macro.as_ref())
    }

    /// Borrow the wrapped sheet
    pub fn inner(&self) -> &S {
        &self.sheet
    }

    /// Unwrap, returning the underlying sheet
    pub fn into_inner(self) -> S {
        self.sheet
    }
}

impl Default for MacroSheet<SparseSheet> {
    fn default() -> Self {
        Self::new(SparseSheet::new())
    }
}

impl<S: Sheet> Sheet for MacroSheet<S> {
    fn get(&self, row: i64, col: i64) -> Result<f64> {
        self.sheet.get(row, col)
    }

    fn set(&mut self, row: i64, col: i64, value: f64) -> Result<()> {
        self.sheet.set(row, col, value)
    }

    fn is_empty(&self, row: i64, col: i64) -> Result<bool> {
        self.sheet.is_empty(row, col)
    }

    fn width(&self) -> usize {
        self.sheet.width()
    }

    fn height(&self) -> usize {
        self.sheet.height()
    }
}

impl<S: Sheet + std::fmt::Debug> std::fmt::Debug for MacroSheet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroSheet")
            .field("sheet", &self.sheet)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet_macro::{AverageMacro, BulkAssignMacro, RangeAssignMacro};
    use std::collections::BTreeMap;

    /// Dense-ish store with its own representation, to show the wrapper only
    /// relies on the `Sheet` contract.
    #[derive(Debug, Default)]
    struct OrderedSheet {
        cells: BTreeMap<(i64, i64), f64>,
        width: usize,
        height: usize,
    }

    impl Sheet for OrderedSheet {
        fn get(&self, row: i64, col: i64) -> Result<f64> {
            if row < 0 || col < 0 {
                return Err(SheetError::InvalidCoordinate { row, col });
            }
            Ok(self.cells.get(&(row, col)).copied().unwrap_or(0.0))
        }

        fn set(&mut self, row: i64, col: i64, value: f64) -> Result<()> {
            if row < 0 || col < 0 {
                return Err(SheetError::InvalidCoordinate { row, col });
            }
            self.cells.insert((row, col), value);
            self.height = self.height.max(row as usize + 1);
            self.width = self.width.max(col as usize + 1);
            Ok(())
        }

        fn is_empty(&self, row: i64, col: i64) -> Result<bool> {
            if row < 0 || col < 0 {
                return Err(SheetError::InvalidCoordinate { row, col });
            }
            Ok(!self.cells.contains_key(&(row, col)))
        }

        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }
    }

    #[test]
    fn test_forwards_sheet_operations() {
        let mut sheet: MacroSheet = MacroSheet::default();

        sheet.set(2, 3, 4.5).unwrap();
        assert_eq!(sheet.get(2, 3).unwrap(), 4.5);
        assert!(!sheet.is_empty(2, 3).unwrap());
        assert!(sheet.is_empty(0, 0).unwrap());
        assert_eq!(sheet.width(), 4);
        assert_eq!(sheet.height(), 3);
        assert_eq!(sheet.inner().cell_count(), 1);
        assert!(sheet.get(-1, 0).is_err());
    }

    #[test]
    fn test_macro_writes_visible_through_wrapper() {
        let mut sheet = MacroSheet::new(SparseSheet::new());

        let mac = RangeAssignMacro::new(0, 0, 0, 4, 10.0, 5.0).unwrap();
        sheet.execute_macro(&mac).unwrap();

        assert_eq!(sheet.get(0, 4).unwrap(), 30.0);
        assert_eq!(sheet.width(), 5);

        let inner = sheet.into_inner();
        assert_eq!(inner.get(0, 2).unwrap(), 20.0);
    }

    #[test]
    fn test_wraps_any_sheet_implementation() {
        let mut sheet = MacroSheet::new(OrderedSheet::default());

        sheet.set(1, 1, 10.0).unwrap();
        sheet.set(2, 2, 30.0).unwrap();
        sheet
            .execute_macro(&AverageMacro::new(1, 1, 2, 2, 3, 3).unwrap())
            .unwrap();
        assert_eq!(sheet.get(3, 3).unwrap(), 10.0);

        sheet
            .execute_macro(&BulkAssignMacro::new(0, 0, 0, 1, 2.0).unwrap())
            .unwrap();
        assert_eq!(sheet.inner().cells.len(), 5);
    }

    #[test]
    fn test_boxed_macros() {
        let mut sheet: MacroSheet = MacroSheet::default();

        let macros: Vec<MacroBox> = vec![
            Box::new(BulkAssignMacro::new(0, 0, 1, 1, 4.0).unwrap()),
            Box::new(AverageMacro::new(0, 0, 1, 1, 0, 2).unwrap()),
        ];
        for mac in macros {
            sheet.execute_boxed(Some(mac)).unwrap();
        }

        assert_eq!(sheet.get(0, 2).unwrap(), 4.0);
    }

    #[test]
    fn test_absent_macro_rejected() {
        let mut sheet: MacroSheet = MacroSheet::default();

        let err = sheet.execute_boxed(None).unwrap_err();
        assert!(matches!(err, SheetError::InvalidArgument(_)));
        assert_eq!(sheet.width(), 0);
    }
}
