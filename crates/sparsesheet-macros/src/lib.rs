pub mod macro_sheet;
pub mod sheet_macro;

pub use macro_sheet::MacroSheet;
pub use sheet_macro::{AverageMacro, BulkAssignMacro, MacroBox, RangeAssignMacro, SheetMacro};
