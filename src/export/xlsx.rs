#![cfg(feature = "xlsx")]

//! `.xlsx` writer for [`ExportTable`]s.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::PriceListResult;
use crate::types::CellValue;

use super::{ExportRow, ExportTable};

/// Number format applied to price cells.
const PRICE_FORMAT: &str = "0.00";

/// Write `table` to an `.xlsx` file at `path`.
///
/// Layout:
/// - Row 0 holds the headers (bold)
/// - Each export row follows in order; banner labels are bold
/// - Numeric cells use a two-decimal number format; blank cells are left empty
pub fn write_xlsx(table: &ExportTable, path: impl AsRef<Path>) -> PriceListResult<()> {
    let mut workbook = build_workbook(table)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Serialize `table` into an in-memory `.xlsx` file (e.g. for a download response).
pub fn xlsx_to_buffer(table: &ExportTable) -> PriceListResult<Vec<u8>> {
    let mut workbook = build_workbook(table)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(table: &ExportTable) -> PriceListResult<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.sheet_title)?;

    let bold = Format::new().set_bold();
    let price = Format::new().set_num_format(PRICE_FORMAT);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &bold)?;
        worksheet.set_column_width(col as u16, column_width(table, col))?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        write_row(worksheet, idx as u32 + 1, row, &bold, &price)?;
    }

    Ok(workbook)
}

fn write_row(ws: &mut Worksheet, row_idx: u32, row: &ExportRow, bold: &Format, price: &Format) -> PriceListResult<()> {
    for (col, cell) in row.cells.iter().enumerate() {
        let col = col as u16;
        match cell {
            CellValue::Empty => {}
            CellValue::Text(s) if s.is_empty() => {}
            CellValue::Text(s) if row.is_banner() => {
                ws.write_string_with_format(row_idx, col, s, bold)?;
            }
            CellValue::Text(s) => {
                ws.write_string(row_idx, col, s)?;
            }
            CellValue::Number(n) => {
                ws.write_number_with_format(row_idx, col, *n, price)?;
            }
            CellValue::Bool(b) => {
                ws.write_boolean(row_idx, col, *b)?;
            }
        }
    }
    Ok(())
}

/// Rough character-based width, clamped so long product names stay readable.
fn column_width(table: &ExportTable, col: usize) -> f64 {
    let longest = table
        .rows
        .iter()
        .filter_map(|r| r.cells.get(col))
        .map(|c| c.to_text().chars().count())
        .chain(std::iter::once(table.headers[col].chars().count()))
        .max()
        .unwrap_or(0);
    (longest as f64 + 2.0).clamp(8.0, 60.0)
}

#[cfg(test)]
mod tests {
    use super::{column_width, xlsx_to_buffer};
    use crate::export::flatten;
    use crate::types::ProductRecord;
    use crate::views::PriceLists;

    fn lists() -> PriceLists {
        PriceLists::from_records(&[ProductRecord {
            category: "Tools".to_string(),
            brand: "Acme".to_string(),
            sku: "A1".to_string(),
            product_name: "Claw hammer with a fibreglass handle".to_string(),
            wholesale_price: 10.0,
            trade_price: 15.0,
            box_quantity_label: "6".to_string(),
        }])
    }

    #[test]
    fn buffer_is_a_zip_container() {
        let table = flatten(lists().wholesale());
        let bytes = xlsx_to_buffer(&table).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn column_width_tracks_longest_cell() {
        let table = flatten(lists().wholesale());
        // "Product Name" column holds the long name.
        assert_eq!(column_width(&table, 3), 38.0);
        // Short columns are clamped to the minimum.
        assert_eq!(column_width(&table, 2), 8.0);
    }
}
