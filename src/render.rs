//! Presentation rendering.
//!
//! [`render`] turns a [`PriceList`] into a [`DisplayTree`] (groups → subgroups → formatted
//! rows) using the same [`PriceList::walk`] traversal as [`crate::export::flatten`], so the
//! screen and the exported sheet always list products in the same order.
//!
//! The tree serializes to JSON for an external UI; [`render_text`] lays it out as plain text for
//! printing.

use serde::Serialize;

use crate::types::{number_to_text, CellValue, ProductRecord};
use crate::views::{ColumnKind, HierarchyVisitor, PriceList, ViewSpec};

/// Display options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for currency cells.
    pub currency_symbol: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
        }
    }
}

/// Render-ready view of one price list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTree {
    pub title: String,
    /// Column headings above each subgroup, if the view shows them.
    pub column_headers: Option<Vec<String>>,
    /// Which columns are right-aligned amounts.
    pub numeric_columns: Vec<bool>,
    pub groups: Vec<DisplayGroup>,
}

/// One outer-key group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayGroup {
    pub label: String,
    pub subgroups: Vec<DisplaySubgroup>,
}

/// One inner-key subgroup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySubgroup {
    pub label: String,
    pub rows: Vec<DisplayRow>,
}

/// One product, every cell already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub sku: String,
    pub cells: Vec<String>,
}

/// Format a currency cell.
///
/// Finite numbers get the symbol and two decimals, with halves rounded away from zero
/// (`0.125` → `0.13`). Anything else is shown raw after the symbol; this never fails.
pub fn format_currency(value: &CellValue, symbol: &str) -> String {
    match value {
        CellValue::Number(n) if n.is_finite() => format!("{symbol}{:.2}", round_cents(*n)),
        CellValue::Number(n) => format!("{symbol}{}", number_to_text(*n)),
        other => format!("{symbol}{}", other.to_text()),
    }
}

fn round_cents(n: f64) -> f64 {
    let rounded = (n * 100.0).round() / 100.0;
    if rounded.is_finite() { rounded } else { n }
}

/// Build the display tree for `list`.
pub fn render(list: &PriceList, options: &RenderOptions) -> DisplayTree {
    let spec = list.spec();
    let mut builder = TreeBuilder {
        spec,
        options,
        groups: Vec::new(),
    };
    list.walk(&mut builder);

    DisplayTree {
        title: spec.title.to_string(),
        column_headers: spec
            .show_column_headers
            .then(|| spec.columns.iter().map(|c| c.display_header.to_string()).collect()),
        numeric_columns: spec
            .columns
            .iter()
            .map(|c| c.kind == ColumnKind::Currency)
            .collect(),
        groups: builder.groups,
    }
}

struct TreeBuilder<'a> {
    spec: &'static ViewSpec,
    options: &'a RenderOptions,
    groups: Vec<DisplayGroup>,
}

impl HierarchyVisitor for TreeBuilder<'_> {
    fn group(&mut self, label: &str) {
        self.groups.push(DisplayGroup {
            label: label.to_string(),
            subgroups: Vec::new(),
        });
    }

    fn subgroup(&mut self, label: &str) {
        if let Some(group) = self.groups.last_mut() {
            group.subgroups.push(DisplaySubgroup {
                label: label.to_string(),
                rows: Vec::new(),
            });
        }
    }

    fn leaf(&mut self, record: &ProductRecord) {
        let cells = self
            .spec
            .columns
            .iter()
            .map(|column| {
                let value = (column.value)(record);
                match column.kind {
                    ColumnKind::Currency => format_currency(&value, &self.options.currency_symbol),
                    ColumnKind::Text => value.to_text(),
                }
            })
            .collect();

        if let Some(subgroup) = self
            .groups
            .last_mut()
            .and_then(|g| g.subgroups.last_mut())
        {
            subgroup.rows.push(DisplayRow {
                sku: record.sku.clone(),
                cells,
            });
        }
    }
}

/// Lay a display tree out as indented plain text, suitable for printing.
pub fn render_text(tree: &DisplayTree) -> String {
    let widths = column_widths(tree);
    let mut lines = vec![
        tree.title.clone(),
        "=".repeat(tree.title.chars().count()),
    ];

    for group in &tree.groups {
        lines.push(String::new());
        lines.push(group.label.clone());
        lines.push("-".repeat(group.label.chars().count()));
        for subgroup in &group.subgroups {
            lines.push(format!("  {}", subgroup.label));
            if let Some(headers) = &tree.column_headers {
                lines.push(format!("      {}", layout_line(headers, &widths, &tree.numeric_columns)));
            }
            for row in &subgroup.rows {
                lines.push(format!("      {}", layout_line(&row.cells, &widths, &tree.numeric_columns)));
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn column_widths(tree: &DisplayTree) -> Vec<usize> {
    let mut widths = vec![0; tree.numeric_columns.len()];
    let rows = tree
        .groups
        .iter()
        .flat_map(|g| g.subgroups.iter())
        .flat_map(|s| s.rows.iter())
        .map(|r| &r.cells);
    for cells in tree.column_headers.iter().chain(rows) {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

fn layout_line(cells: &[String], widths: &[usize], numeric: &[bool]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(numeric)
        .map(|((cell, &w), &right)| {
            if right {
                format!("{cell:>w$}")
            } else {
                format!("{cell:<w$}")
            }
        })
        .collect();
    parts.join("  ").trim_end().to_string()
}
