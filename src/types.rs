//! Core data model types.
//!
//! Input arrives as loosely-typed [`RawRow`]s (column name → [`CellValue`]) and is turned into
//! strictly-typed [`ProductRecord`]s by [`crate::normalize`].

use std::fmt;

/// Column names consumed from the source sheet.
pub mod columns {
    pub const CATEGORY: &str = "Category";
    pub const BRAND: &str = "Brand";
    pub const SKU: &str = "SKU";
    pub const PRODUCT_NAME: &str = "Product Name";
    pub const WHOLESALE: &str = "Wholesale";
    pub const TRADE: &str = "Trade £";
    pub const BOX_QUANTITY: &str = "(Box) Ctn";

    /// Every column the normalizer reads, in sheet order.
    pub const REQUIRED: [&str; 7] = [CATEGORY, BRAND, SKU, PRODUCT_NAME, WHOLESALE, TRADE, BOX_QUANTITY];
}

/// A single untyped spreadsheet cell.
///
/// Used both for input rows and for the cells of flattened export rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing/blank cell.
    Empty,
    /// Text cell.
    Text(String),
    /// Numeric cell (integers are widened to `f64`, as spreadsheets store them).
    Number(f64),
    /// Boolean cell.
    Bool(bool),
}

impl CellValue {
    /// Build a text cell.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Returns `true` for [`CellValue::Empty`] and for empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// String coercion used for identifying and label fields.
    ///
    /// Integral numbers print without a fraction so that `6.0` reads back as `"6"`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => number_to_text(*n),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

pub(crate) fn number_to_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

/// One loosely-typed input row, as produced by a spreadsheet reader.
///
/// Keeps the source column order. Lookups return the first column with a matching name, so a
/// repeated header never shadows the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell, builder-style.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a cell.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Returns the value of the first column named `column`, if any.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_blank())
    }

    /// Iterate `(column, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One validated product row.
///
/// Both price views are derived from the same records; the trade view simply never projects
/// `wholesale_price`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub category: String,
    pub brand: String,
    /// Stable identifier; not unique across the dataset.
    pub sku: String,
    pub product_name: String,
    pub wholesale_price: f64,
    pub trade_price: f64,
    /// Free text such as `"12"` or `"1x6"`; carried through unchanged.
    pub box_quantity_label: String,
}
