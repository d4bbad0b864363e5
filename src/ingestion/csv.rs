//! CSV reader.

use std::path::Path;

use crate::error::PriceListResult;
use crate::types::{CellValue, RawRow};

/// Read a CSV file into raw rows.
///
/// Rules:
///
/// - The first record is the header row; header names are trimmed.
/// - Rows may be shorter or longer than the header; extra fields are ignored.
/// - Empty fields become [`CellValue::Empty`], everything else [`CellValue::Text`].
/// - Rows with no non-empty field are skipped.
pub fn read_csv_rows(path: impl AsRef<Path>) -> PriceListResult<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    read_csv_from_reader(&mut rdr)
}

/// Read raw rows from an existing CSV reader.
pub fn read_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> PriceListResult<Vec<RawRow>> {
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            let value = if field.is_empty() {
                CellValue::Empty
            } else {
                CellValue::text(field)
            };
            row.push(header.as_str(), value);
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::read_csv_from_reader;
    use crate::types::CellValue;

    #[test]
    fn reads_rows_keyed_by_trimmed_headers() {
        let data = "SKU, Category ,Brand,Trade £\nA1,Tools,Acme,15\n,,,\nA2,Tools,Acme\n";
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data.as_bytes());
        let rows = read_csv_from_reader(&mut rdr).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Category"), Some(&CellValue::text("Tools")));
        assert_eq!(rows[0].get("Trade £"), Some(&CellValue::text("15")));
        assert_eq!(rows[1].get("Trade £"), None);
    }
}
