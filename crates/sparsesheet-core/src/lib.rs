pub mod error;
pub mod range;
pub mod sheet;

pub use error::{Result, SheetError};
pub use range::{row_from_label, CellCoord, CellRange, CellRangeIter};
pub use sheet::{Sheet, SparseSheet};
