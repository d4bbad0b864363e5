//! Record normalization: loosely-typed rows → [`ProductRecord`]s.
//!
//! Rules:
//!
//! - A row is kept only if `SKU`, `Category` and `Brand` coerce to non-empty strings; other rows
//!   are dropped silently.
//! - Text fields fall back to `""`.
//! - `Wholesale` and `Trade £` are parsed leniently and fall back to `0`.
//! - `(Box) Ctn` is carried through as text, unchanged.

use tracing::debug;

use crate::types::{columns, CellValue, ProductRecord, RawRow};

/// Counts produced by [`normalize_rows`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Rows handed to the normalizer.
    pub input_rows: usize,
    /// Rows turned into records.
    pub kept: usize,
    /// Rows dropped for a missing SKU/Category/Brand.
    pub dropped: usize,
}

/// Normalize a sequence of raw rows, preserving input order.
pub fn normalize_rows<'a, I>(rows: I) -> (Vec<ProductRecord>, NormalizeReport)
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut input_rows = 0;
    let records: Vec<ProductRecord> = rows
        .into_iter()
        .inspect(|_| input_rows += 1)
        .filter_map(normalize_row)
        .collect();

    let report = NormalizeReport {
        input_rows,
        kept: records.len(),
        dropped: input_rows - records.len(),
    };
    debug!(
        input_rows = report.input_rows,
        kept = report.kept,
        dropped = report.dropped,
        "normalized rows"
    );
    (records, report)
}

/// Normalize one row, or `None` if it lacks an identifying field.
pub fn normalize_row(row: &RawRow) -> Option<ProductRecord> {
    let sku = text_field(row, columns::SKU);
    let category = text_field(row, columns::CATEGORY);
    let brand = text_field(row, columns::BRAND);
    if sku.is_empty() || category.is_empty() || brand.is_empty() {
        return None;
    }

    Some(ProductRecord {
        category,
        brand,
        sku,
        product_name: text_field(row, columns::PRODUCT_NAME),
        wholesale_price: number_field(row, columns::WHOLESALE),
        trade_price: number_field(row, columns::TRADE),
        box_quantity_label: text_field(row, columns::BOX_QUANTITY),
    })
}

fn text_field(row: &RawRow, column: &str) -> String {
    row.get(column).map(CellValue::to_text).unwrap_or_default()
}

fn number_field(row: &RawRow, column: &str) -> f64 {
    row.get(column).map(coerce_number).unwrap_or(0.0)
}

/// Lenient numeric coercion; anything unusable becomes `0`, and `-0` becomes `0`.
pub fn coerce_number(value: &CellValue) -> f64 {
    let n = match value {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_leading_float(s).unwrap_or(0.0),
        CellValue::Bool(_) | CellValue::Empty => 0.0,
    };
    if n.is_finite() && n != 0.0 { n } else { 0.0 }
}

/// Parse the longest decimal prefix of `s` (after leading whitespace).
///
/// `"12.5abc"` → `12.5`, `"  7"` → `7`, `"1e3x"` → `1000`, `"£15"` → `None`.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
