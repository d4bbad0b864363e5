//! `.csv` writer for [`ExportTable`]s.

use std::io::Write;
use std::path::Path;

use crate::error::PriceListResult;

use super::ExportTable;

/// Write `table` as CSV to `path` (header row first, blank cells as empty fields).
pub fn write_csv(table: &ExportTable, path: impl AsRef<Path>) -> PriceListResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_table(&mut wtr, table)
}

/// Write `table` as CSV into any writer.
pub fn write_csv_to<W: Write>(table: &ExportTable, writer: W) -> PriceListResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    write_table(&mut wtr, table)
}

fn write_table<W: Write>(wtr: &mut csv::Writer<W>, table: &ExportTable) -> PriceListResult<()> {
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.cells.iter().map(|c| c.to_text()))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_csv_to;
    use crate::export::flatten;
    use crate::types::ProductRecord;
    use crate::views::PriceLists;

    #[test]
    fn csv_keeps_blank_banner_cells() {
        let lists = PriceLists::from_records(&[ProductRecord {
            category: "Tools".to_string(),
            brand: "Acme".to_string(),
            sku: "A1".to_string(),
            product_name: "Hammer".to_string(),
            wholesale_price: 10.0,
            trade_price: 15.5,
            box_quantity_label: "1x6".to_string(),
        }]);

        let mut out = Vec::new();
        write_csv_to(&flatten(lists.trade()), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Category,Brand,SKU,Product Name,Trade £,(Box) Ctn\n\
             Tools,,,,,\n\
             ,Acme,,,,\n\
             ,,A1,Hammer,15.5,1x6\n"
        );
    }
}
