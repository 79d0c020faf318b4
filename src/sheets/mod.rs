pub mod a1_notation;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod value_range_factory;

pub use a1_notation::{A1Notation, SheetRanges};
pub use spreadsheet_manager::{
    RangeWriter, SpreadsheetManager, SpreadsheetManagerError, ValueInputOption,
};
