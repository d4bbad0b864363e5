//! The two price-list views and the traversal they share.
//!
//! A [`ViewSpec`] describes one view: which record field is the outer key, which is the inner
//! key, and which fields each leaf row projects. The wholesale and trade views differ only in
//! their spec, so grouping, export and rendering are each written once.
//!
//! [`PriceList::walk`] is the single traversal used by both [`crate::export`] and
//! [`crate::render`], which keeps the on-screen and exported orders identical.

use std::fmt;

use tracing::debug;

use crate::grouping::{group_by, leaf_count, GroupedHierarchy};
use crate::types::{CellValue, ProductRecord};

/// Which price list to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Brand → Category, with wholesale and trade prices.
    Wholesale,
    /// Category → Brand, trade price only.
    Trade,
}

impl ViewKind {
    /// Both views, in tab order.
    pub const ALL: [ViewKind; 2] = [ViewKind::Wholesale, ViewKind::Trade];

    /// The descriptor for this view.
    pub fn spec(self) -> &'static ViewSpec {
        match self {
            ViewKind::Wholesale => &WHOLESALE_VIEW,
            ViewKind::Trade => &TRADE_VIEW,
        }
    }
}

/// How a leaf column is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Currency,
}

/// One projected leaf field.
pub struct LeafColumn {
    /// Header used in the exported sheet.
    pub export_header: &'static str,
    /// Header used in the display tree.
    pub display_header: &'static str,
    pub kind: ColumnKind,
    /// Extracts the cell from a record.
    pub value: fn(&ProductRecord) -> CellValue,
}

/// Static description of a price-list view.
pub struct ViewSpec {
    pub kind: ViewKind,
    /// Heading shown above the rendered list.
    pub title: &'static str,
    /// Worksheet name used on export.
    pub sheet_title: &'static str,
    /// Export file name without extension.
    pub file_stem: &'static str,
    /// Export header of the outer banner column.
    pub outer_header: &'static str,
    /// Export header of the inner banner column.
    pub inner_header: &'static str,
    pub outer_key: fn(&ProductRecord) -> &str,
    pub inner_key: fn(&ProductRecord) -> &str,
    pub columns: &'static [LeafColumn],
    /// Whether the display tree carries a column-header row.
    pub show_column_headers: bool,
}

impl fmt::Debug for LeafColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafColumn")
            .field("export_header", &self.export_header)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Debug for ViewSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSpec")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("columns", &self.columns)
            .finish()
    }
}

impl ViewSpec {
    /// Export headers: the two banner columns followed by the leaf columns.
    pub fn export_headers(&self) -> Vec<&'static str> {
        let mut headers = vec![self.outer_header, self.inner_header];
        headers.extend(self.columns.iter().map(|c| c.export_header));
        headers
    }

    /// Project a record onto this view's leaf columns.
    pub fn project(&self, record: &ProductRecord) -> Vec<CellValue> {
        self.columns.iter().map(|c| (c.value)(record)).collect()
    }
}

fn brand_of(r: &ProductRecord) -> &str {
    &r.brand
}

fn category_of(r: &ProductRecord) -> &str {
    &r.category
}

fn sku_cell(r: &ProductRecord) -> CellValue {
    CellValue::text(&r.sku)
}

fn name_cell(r: &ProductRecord) -> CellValue {
    CellValue::text(&r.product_name)
}

fn wholesale_cell(r: &ProductRecord) -> CellValue {
    CellValue::Number(r.wholesale_price)
}

fn trade_cell(r: &ProductRecord) -> CellValue {
    CellValue::Number(r.trade_price)
}

fn box_cell(r: &ProductRecord) -> CellValue {
    CellValue::text(&r.box_quantity_label)
}

const SKU_COLUMN: LeafColumn = LeafColumn {
    export_header: "SKU",
    display_header: "SKU",
    kind: ColumnKind::Text,
    value: sku_cell,
};

const NAME_COLUMN: LeafColumn = LeafColumn {
    export_header: "Product Name",
    display_header: "Product",
    kind: ColumnKind::Text,
    value: name_cell,
};

const WHOLESALE_COLUMN: LeafColumn = LeafColumn {
    export_header: "Wholesale",
    display_header: "Wholesale",
    kind: ColumnKind::Currency,
    value: wholesale_cell,
};

const TRADE_COLUMN: LeafColumn = LeafColumn {
    export_header: "Trade £",
    display_header: "Trade £",
    kind: ColumnKind::Currency,
    value: trade_cell,
};

const BOX_COLUMN: LeafColumn = LeafColumn {
    export_header: "(Box) Ctn",
    display_header: "(Box) Ctn.",
    kind: ColumnKind::Text,
    value: box_cell,
};

static WHOLESALE_COLUMNS: [LeafColumn; 5] = [SKU_COLUMN, NAME_COLUMN, WHOLESALE_COLUMN, TRADE_COLUMN, BOX_COLUMN];

static TRADE_COLUMNS: [LeafColumn; 4] = [SKU_COLUMN, NAME_COLUMN, TRADE_COLUMN, BOX_COLUMN];

/// Brand → Category, wholesale and trade prices.
pub static WHOLESALE_VIEW: ViewSpec = ViewSpec {
    kind: ViewKind::Wholesale,
    title: "Wholesale Price List",
    sheet_title: "Wholesale Price List",
    file_stem: "Wholesale_Price_List",
    outer_header: "Brand",
    inner_header: "Product Type",
    outer_key: brand_of,
    inner_key: category_of,
    columns: &WHOLESALE_COLUMNS,
    show_column_headers: true,
};

/// Category → Brand, trade price only.
pub static TRADE_VIEW: ViewSpec = ViewSpec {
    kind: ViewKind::Trade,
    title: "Trade Price List",
    sheet_title: "Trade Price List",
    file_stem: "Trade_Price_List",
    outer_header: "Category",
    inner_header: "Brand",
    outer_key: category_of,
    inner_key: brand_of,
    columns: &TRADE_COLUMNS,
    show_column_headers: false,
};

/// Callbacks for [`PriceList::walk`], invoked in hierarchy order.
pub trait HierarchyVisitor {
    /// Start of an outer-key group.
    fn group(&mut self, label: &str);
    /// Start of an inner-key subgroup within the current group.
    fn subgroup(&mut self, label: &str);
    /// One record within the current subgroup.
    fn leaf(&mut self, record: &ProductRecord);
}

/// One grouped view over a set of records. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct PriceList {
    spec: &'static ViewSpec,
    groups: GroupedHierarchy<ProductRecord>,
}

impl PriceList {
    /// Group `records` according to `spec`.
    pub fn build(spec: &'static ViewSpec, records: &[ProductRecord]) -> Self {
        let groups = group_by(records.iter().cloned(), spec.outer_key, spec.inner_key);
        debug!(
            view = ?spec.kind,
            groups = groups.len(),
            products = records.len(),
            "grouped price list"
        );
        Self { spec, groups }
    }

    /// The view descriptor.
    pub fn spec(&self) -> &'static ViewSpec {
        self.spec
    }

    /// Which view this list was built for.
    pub fn kind(&self) -> ViewKind {
        self.spec.kind
    }

    /// The grouped records.
    pub fn groups(&self) -> &GroupedHierarchy<ProductRecord> {
        &self.groups
    }

    /// Number of leaf records.
    pub fn product_count(&self) -> usize {
        leaf_count(&self.groups)
    }

    /// Visit groups, subgroups and records in stored order.
    pub fn walk<V: HierarchyVisitor + ?Sized>(&self, visitor: &mut V) {
        for (outer, inner_groups) in self.groups.iter() {
            visitor.group(outer);
            for (inner, records) in inner_groups.iter() {
                visitor.subgroup(inner);
                for record in records {
                    visitor.leaf(record);
                }
            }
        }
    }
}

/// Both views derived from one load.
#[derive(Debug, Clone)]
pub struct PriceLists {
    wholesale: PriceList,
    trade: PriceList,
}

impl PriceLists {
    /// Build both views from the same normalized records.
    pub fn from_records(records: &[ProductRecord]) -> Self {
        Self {
            wholesale: PriceList::build(&WHOLESALE_VIEW, records),
            trade: PriceList::build(&TRADE_VIEW, records),
        }
    }

    /// The requested view.
    pub fn get(&self, kind: ViewKind) -> &PriceList {
        match kind {
            ViewKind::Wholesale => &self.wholesale,
            ViewKind::Trade => &self.trade,
        }
    }

    pub fn wholesale(&self) -> &PriceList {
        &self.wholesale
    }

    pub fn trade(&self) -> &PriceList {
        &self.trade
    }

    /// Number of products loaded (the same in both views).
    pub fn product_count(&self) -> usize {
        self.wholesale.product_count()
    }
}
