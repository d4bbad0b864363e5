//! Flattening export.
//!
//! [`flatten`] walks a [`PriceList`] and produces an [`ExportTable`]: one banner row per group,
//! one banner row per subgroup, then one leaf row per record. Group structure is carried only by
//! the banner rows, which fill a single label cell and leave every other cell blank:
//!
//! ```text
//! Brand | Product Type | SKU | Product Name | Wholesale | Trade £ | (Box) Ctn
//! Acme  |              |     |              |           |         |
//!       | Tools        |     |              |           |         |
//!       |              | A1  | Hammer       | 10        | 15      | 6
//! ```
//!
//! Writers for `.xlsx` ([`xlsx`], feature `xlsx`) and `.csv` ([`csv`]) serialize the table.

pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PriceListResult;
use crate::types::{CellValue, ProductRecord};
use crate::views::{HierarchyVisitor, PriceList, ViewSpec};

/// Position of the outer-key label in a row.
pub const GROUP_LABEL_COLUMN: usize = 0;
/// Position of the inner-key label in a row.
pub const SUBGROUP_LABEL_COLUMN: usize = 1;

/// What an [`ExportRow`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Outer-key banner.
    GroupBanner,
    /// Inner-key banner.
    SubgroupBanner,
    /// One product.
    Leaf,
}

/// One flattened row. `cells` always has one entry per table header.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub kind: RowKind,
    pub cells: Vec<CellValue>,
}

impl ExportRow {
    /// Returns `true` for group and subgroup banners.
    pub fn is_banner(&self) -> bool {
        self.kind != RowKind::Leaf
    }
}

/// A flattened price list, ready to be written as a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub sheet_title: String,
    pub file_stem: String,
    pub headers: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    /// Leaf rows only, in order.
    pub fn leaf_rows(&self) -> impl Iterator<Item = &ExportRow> {
        self.rows.iter().filter(|r| r.kind == RowKind::Leaf)
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Excel workbook (feature `xlsx`).
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Flatten a price list into banner and leaf rows.
pub fn flatten(list: &PriceList) -> ExportTable {
    let spec = list.spec();
    let mut flattener = Flattener {
        spec,
        width: spec.columns.len() + 2,
        rows: Vec::new(),
    };
    list.walk(&mut flattener);

    ExportTable {
        sheet_title: spec.sheet_title.to_string(),
        file_stem: spec.file_stem.to_string(),
        headers: spec.export_headers().into_iter().map(String::from).collect(),
        rows: flattener.rows,
    }
}

struct Flattener {
    spec: &'static ViewSpec,
    width: usize,
    rows: Vec<ExportRow>,
}

impl Flattener {
    fn banner(&mut self, kind: RowKind, column: usize, label: &str) {
        let mut cells = vec![CellValue::Empty; self.width];
        cells[column] = CellValue::text(label);
        self.rows.push(ExportRow { kind, cells });
    }
}

impl HierarchyVisitor for Flattener {
    fn group(&mut self, label: &str) {
        self.banner(RowKind::GroupBanner, GROUP_LABEL_COLUMN, label);
    }

    fn subgroup(&mut self, label: &str) {
        self.banner(RowKind::SubgroupBanner, SUBGROUP_LABEL_COLUMN, label);
    }

    fn leaf(&mut self, record: &ProductRecord) {
        let mut cells = vec![CellValue::Empty, CellValue::Empty];
        cells.extend(self.spec.project(record));
        self.rows.push(ExportRow {
            kind: RowKind::Leaf,
            cells,
        });
    }
}

/// Flatten `list` and write it into `dir` as `<file stem>.<ext>`. Returns the written path.
pub fn export_to_dir(list: &PriceList, dir: impl AsRef<Path>, format: ExportFormat) -> PriceListResult<PathBuf> {
    let table = flatten(list);
    let path = dir
        .as_ref()
        .join(format!("{}.{}", table.file_stem, format.extension()));

    match format {
        ExportFormat::Csv => csv::write_csv(&table, &path)?,
        ExportFormat::Xlsx => write_xlsx_dispatch(&table, &path)?,
    }

    info!(
        view = ?list.kind(),
        path = %path.display(),
        rows = table.rows.len(),
        products = list.product_count(),
        "exported price list"
    );
    Ok(path)
}

fn write_xlsx_dispatch(table: &ExportTable, path: &Path) -> PriceListResult<()> {
    // Avoid unused warnings when the feature is off.
    let _ = (table, path);

    #[cfg(feature = "xlsx")]
    {
        xlsx::write_xlsx(table, path)
    }

    #[cfg(not(feature = "xlsx"))]
    {
        Err(crate::error::PriceListError::UnsupportedFormat {
            message: "xlsx export not enabled (enable cargo feature 'xlsx')".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{flatten, RowKind};
    use crate::types::{CellValue, ProductRecord};
    use crate::views::PriceLists;

    fn record(sku: &str, category: &str, brand: &str, wholesale: f64) -> ProductRecord {
        ProductRecord {
            category: category.to_string(),
            brand: brand.to_string(),
            sku: sku.to_string(),
            product_name: format!("{sku} name"),
            wholesale_price: wholesale,
            trade_price: 15.0,
            box_quantity_label: "1x6".to_string(),
        }
    }

    fn records() -> Vec<ProductRecord> {
        vec![
            record("A1", "Tools", "Acme", 10.0),
            record("A2", "Tools", "Acme", 0.0),
            record("B1", "Paint", "Brite", 4.5),
            record("A3", "Paint", "Acme", 7.0),
        ]
    }

    #[test]
    fn wholesale_export_interleaves_banners() {
        let lists = PriceLists::from_records(&records());
        let table = flatten(lists.wholesale());

        assert_eq!(table.sheet_title, "Wholesale Price List");
        assert_eq!(table.file_stem, "Wholesale_Price_List");
        let kinds: Vec<RowKind> = table.rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RowKind::GroupBanner,
                RowKind::SubgroupBanner,
                RowKind::Leaf,
                RowKind::Leaf,
                RowKind::SubgroupBanner,
                RowKind::Leaf,
                RowKind::GroupBanner,
                RowKind::SubgroupBanner,
                RowKind::Leaf,
            ]
        );
        assert_eq!(table.rows[0].cells[0], CellValue::text("Acme"));
        assert_eq!(table.rows[1].cells[1], CellValue::text("Tools"));
        assert_eq!(
            table.rows[2].cells,
            vec![
                CellValue::Empty,
                CellValue::Empty,
                CellValue::text("A1"),
                CellValue::text("A1 name"),
                CellValue::Number(10.0),
                CellValue::Number(15.0),
                CellValue::text("1x6"),
            ]
        );
    }

    #[test]
    fn banners_carry_exactly_one_label() {
        let lists = PriceLists::from_records(&records());
        for list in [lists.wholesale(), lists.trade()] {
            let table = flatten(list);
            for row in table.rows.iter().filter(|r| r.is_banner()) {
                assert_eq!(row.cells.len(), table.headers.len());
                assert_eq!(row.cells.iter().filter(|c| !c.is_blank()).count(), 1);
            }
            for row in table.leaf_rows() {
                assert_eq!(row.cells.len(), table.headers.len());
            }
        }
    }

    #[test]
    fn trade_export_has_no_wholesale_column() {
        let lists = PriceLists::from_records(&records());
        let table = flatten(lists.trade());
        assert_eq!(
            table.headers,
            vec!["Category", "Brand", "SKU", "Product Name", "Trade £", "(Box) Ctn"]
        );
        assert_eq!(table.rows[0].cells[0], CellValue::text("Tools"));
        assert_eq!(table.rows[1].cells[1], CellValue::text("Acme"));
        let leaf = table.leaf_rows().next().unwrap();
        assert_eq!(leaf.cells[4], CellValue::Number(15.0));
    }

    #[test]
    fn leaf_rows_reproduce_records_in_group_order() {
        let lists = PriceLists::from_records(&records());
        let skus: Vec<String> = flatten(lists.wholesale())
            .leaf_rows()
            .map(|r| r.cells[2].to_text())
            .collect();
        assert_eq!(skus, vec!["A1", "A2", "A3", "B1"]);

        let skus: Vec<String> = flatten(lists.trade())
            .leaf_rows()
            .map(|r| r.cells[2].to_text())
            .collect();
        assert_eq!(skus, vec!["A1", "A2", "B1", "A3"]);
    }
}
