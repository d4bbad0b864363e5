//! Unified input entrypoint.
//!
//! Most callers should use [`read_rows`], which reads a spreadsheet file into raw rows.
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension.
//! - For workbooks, [`LoadOptions::sheet_selection`] decides which sheet is read.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{PriceListError, PriceListResult};
use crate::types::RawRow;

use super::csv;
use super::observability::{Severity, StatusObserver};

/// Sheet names preferred by [`SheetSelection::RawData`], checked against workbook order.
pub const PREFERRED_SHEETS: [&str; 2] = ["Raw_Data", "Raw_Data (2)"];

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl InputFormat {
    /// Parse an input format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Infer the format of `path` from its extension.
    pub fn from_path(path: &Path) -> PriceListResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PriceListError::UnsupportedFormat {
                message: format!("cannot infer format: path has no extension ({})", path.display()),
            })?;

        Self::from_extension(ext).ok_or_else(|| PriceListError::UnsupportedFormat {
            message: format!("cannot infer format from extension '{ext}' for path ({})", path.display()),
        })
    }
}

/// How to choose the sheet of a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    /// The first sheet named in [`PREFERRED_SHEETS`], else the first sheet (default).
    #[default]
    RawData,
    /// Always the first sheet.
    First,
    /// A single named sheet; missing is an error.
    Named(String),
}

/// Pick a sheet name from `names` (workbook order).
pub fn select_sheet(names: &[String], selection: &SheetSelection) -> PriceListResult<String> {
    let first = names.first().ok_or(PriceListError::EmptyWorkbook)?;

    match selection {
        SheetSelection::RawData => Ok(names
            .iter()
            .find(|n| PREFERRED_SHEETS.contains(&n.as_str()))
            .unwrap_or(first)
            .clone()),
        SheetSelection::First => Ok(first.clone()),
        SheetSelection::Named(name) => names
            .iter()
            .find(|n| *n == name)
            .cloned()
            .ok_or_else(|| PriceListError::SheetNotFound {
                name: name.clone(),
                available: names.to_vec(),
            }),
    }
}

/// Options controlling how a file is loaded.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer format from file extension.
    pub format: Option<InputFormat>,
    /// Workbook sheet choice; ignored for CSV.
    pub sheet_selection: SheetSelection,
    /// Optional observer for user-visible status notices.
    pub observer: Option<Arc<dyn StatusObserver>>,
    /// Severity at or above which `on_alert` is invoked as well.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("sheet_selection", &self.sheet_selection)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet_selection: SheetSelection::default(),
            observer: None,
            alert_at_or_above: Severity::Error,
        }
    }
}

/// Read the raw rows of a spreadsheet file.
///
/// This is the only fallible I/O step; normalization and grouping never fail per row.
///
/// # Examples
///
/// ```no_run
/// use price_list::ingestion::{read_rows, LoadOptions, SheetSelection};
///
/// # fn main() -> Result<(), price_list::PriceListError> {
/// let opts = LoadOptions {
///     sheet_selection: SheetSelection::Named("Stock".to_string()),
///     ..Default::default()
/// };
/// let rows = read_rows("products.xlsx", &opts)?;
/// println!("rows={}", rows.len());
/// # Ok(())
/// # }
/// ```
pub fn read_rows(path: impl AsRef<Path>, options: &LoadOptions) -> PriceListResult<Vec<RawRow>> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => InputFormat::from_path(path)?,
    };

    match format {
        InputFormat::Csv => csv::read_csv_rows(path),
        InputFormat::Excel => read_excel_dispatch(path, &options.sheet_selection),
    }
}

fn read_excel_dispatch(path: &Path, selection: &SheetSelection) -> PriceListResult<Vec<RawRow>> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, selection);

    #[cfg(feature = "excel")]
    {
        super::excel::read_excel_rows(path, selection)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(PriceListError::UnsupportedFormat {
            message: "excel input not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{select_sheet, InputFormat, SheetSelection};
    use crate::error::PriceListError;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn raw_data_sheets_win_in_workbook_order() {
        let sel = SheetSelection::RawData;
        assert_eq!(select_sheet(&names(&["Summary", "Raw_Data", "Other"]), &sel).unwrap(), "Raw_Data");
        assert_eq!(
            select_sheet(&names(&["Summary", "Raw_Data (2)", "Raw_Data"]), &sel).unwrap(),
            "Raw_Data (2)"
        );
        assert_eq!(select_sheet(&names(&["Summary", "raw_data"]), &sel).unwrap(), "Summary");
    }

    #[test]
    fn named_and_first_selection() {
        let all = names(&["A", "B"]);
        assert_eq!(select_sheet(&all, &SheetSelection::First).unwrap(), "A");
        assert_eq!(select_sheet(&all, &SheetSelection::Named("B".to_string())).unwrap(), "B");
        let err = select_sheet(&all, &SheetSelection::Named("C".to_string())).unwrap_err();
        assert!(matches!(err, PriceListError::SheetNotFound { ref name, .. } if name == "C"));
    }

    #[test]
    fn empty_workbook_is_an_error() {
        let err = select_sheet(&[], &SheetSelection::RawData).unwrap_err();
        assert!(matches!(err, PriceListError::EmptyWorkbook));
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a/b.XLSX")).unwrap(), InputFormat::Excel);
        assert_eq!(InputFormat::from_path(Path::new("list.csv")).unwrap(), InputFormat::Csv);
        assert!(InputFormat::from_path(Path::new("list.pdf")).is_err());
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }
}
