//! Input boundary: spreadsheet files → loosely-typed [`crate::types::RawRow`]s.
//!
//! Most callers should use [`read_rows`] (from [`unified`]) which:
//!
//! - infers the input format from the file extension (or uses [`LoadOptions::format`])
//! - picks the sheet to read (`Raw_Data` / `Raw_Data (2)` first, else the first sheet)
//! - returns every non-blank row keyed by the header row
//!
//! Format-specific readers live under [`csv`] and [`excel`] (feature `excel`). Status
//! notifications for the caller are defined in [`observability`].

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, Severity, StatusNotice, StatusObserver, TracingObserver,
};
pub use unified::{read_rows, select_sheet, InputFormat, LoadOptions, SheetSelection, PREFERRED_SHEETS};
