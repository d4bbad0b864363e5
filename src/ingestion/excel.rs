#![cfg(feature = "excel")]

//! Workbook reader (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`) backed by calamine.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::PriceListResult;
use crate::types::{CellValue, RawRow};

use super::unified::{select_sheet, SheetSelection};

/// Read one sheet of a workbook into raw rows.
///
/// Behavior:
/// - Picks the sheet according to `selection` (see [`select_sheet`])
/// - Detects the first non-empty row as the header row (header cells are trimmed)
/// - Turns every later non-blank row into a [`RawRow`] keyed by header name
pub fn read_excel_rows(path: impl AsRef<Path>, selection: &SheetSelection) -> PriceListResult<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet = select_sheet(&names, selection)?;

    let range = workbook.worksheet_range(&sheet)?;
    let rows = rows_from_range(&range);
    debug!(sheet = %sheet, rows = rows.len(), "read worksheet");
    Ok(rows)
}

/// Convert a sheet range into raw rows (header row first).
///
/// A range without any non-empty row yields no rows.
pub fn rows_from_range(range: &Range<Data>) -> Vec<RawRow> {
    let mut iter = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));
    let headers: Vec<String> = match iter.next() {
        Some(header_row) => header_row.iter().map(|c| cell_to_header_string(c).trim().to_string()).collect(),
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for cells in iter {
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            row.push(header.as_str(), convert_cell(cell));
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }
    rows
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => convert_cell(other).to_text(),
    }
}

fn convert_cell(c: &Data) -> CellValue {
    match c {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(_) => CellValue::Text(c.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}
