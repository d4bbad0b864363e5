use thiserror::Error;

/// Convenience result type for price-list operations.
pub type PriceListResult<T> = Result<T, PriceListError>;

/// Error type returned by loading and exporting functions.
///
/// Row-level defects never show up here: malformed rows are dropped or coerced during
/// normalization. Only dataset-level and I/O-level conditions are surfaced.
#[derive(Debug, Error)]
pub enum PriceListError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or a sheet could not be read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV read or write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    /// `.xlsx` export error (feature-gated behind `xlsx`).
    #[error("xlsx export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The input format could not be inferred or is not enabled in this build.
    #[error("unsupported input format: {message}")]
    UnsupportedFormat { message: String },

    /// The workbook contains no sheets at all.
    #[error("workbook has no sheets")]
    EmptyWorkbook,

    /// A sheet requested by name is not present in the workbook.
    #[error("sheet '{name}' not found. sheets={available:?}")]
    SheetNotFound { name: String, available: Vec<String> },

    /// No row survived normalization (missing SKU/Category/Brand everywhere, or an empty sheet).
    #[error("no valid product rows found ({input_rows} rows read)")]
    NoValidRecords { input_rows: usize },
}
