//! `price-list` turns a product spreadsheet into two grouped price lists:
//!
//! - **Wholesale**: grouped by Brand, then Category; wholesale and trade prices
//! - **Trade**: grouped by Category, then Brand; trade price only
//!
//! Each list can be rendered as a display tree (for screen or print) or flattened into a
//! spreadsheet with banner rows marking the groups.
//!
//! ## Pipeline
//!
//! ```text
//! file ─► ingestion::read_rows ─► normalize ─► views::PriceLists ─┬─► render::render
//!                                                                 └─► export::flatten ─► .xlsx / .csv
//! ```
//!
//! - [`ingestion`]: reads `.xlsx`/`.xls`/`.ods` (feature `excel`) or `.csv` into raw rows; prefers
//!   a sheet named `Raw_Data` or `Raw_Data (2)`, else the first sheet
//! - [`normalize`]: keeps rows with a SKU, Category and Brand; coerces prices leniently to numbers
//! - [`grouping`]: insertion-ordered two-level grouping
//! - [`views`]: the wholesale and trade view descriptors and their shared traversal
//! - [`export`]: banner-row flattening and the `.xlsx` (feature `xlsx`) / `.csv` writers
//! - [`render`]: display tree, currency formatting and a plain-text print layout
//! - [`session`]: load lifecycle and status notices
//!
//! Groups and products keep first-seen input order everywhere; nothing is sorted.
//!
//! ## Quick example
//!
//! ```rust
//! use price_list::export::flatten;
//! use price_list::render::{render, RenderOptions};
//! use price_list::session::build_price_lists;
//! use price_list::types::RawRow;
//!
//! let rows = vec![
//!     RawRow::new()
//!         .with("SKU", "A1")
//!         .with("Category", "Tools")
//!         .with("Brand", "Acme")
//!         .with("Product Name", "Hammer")
//!         .with("Wholesale", "10")
//!         .with("Trade £", "15")
//!         .with("(Box) Ctn", "6"),
//!     // No Brand: dropped.
//!     RawRow::new().with("SKU", "A2").with("Category", "Tools"),
//! ];
//!
//! let (lists, report) = build_price_lists(&rows).unwrap();
//! assert_eq!(report.dropped, 1);
//!
//! let tree = render(lists.wholesale(), &RenderOptions::default());
//! assert_eq!(tree.groups[0].label, "Acme");
//! assert_eq!(tree.groups[0].subgroups[0].rows[0].cells[2], "£10.00");
//!
//! let table = flatten(lists.trade());
//! assert_eq!(table.rows.len(), 3); // Category banner, Brand banner, one product
//! ```
//!
//! ## Loading a file
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use price_list::ingestion::{LoadOptions, TracingObserver};
//! use price_list::session::PriceListSession;
//!
//! # fn main() -> Result<(), price_list::PriceListError> {
//! let mut session = PriceListSession::new(LoadOptions {
//!     observer: Some(Arc::new(TracingObserver)),
//!     ..Default::default()
//! });
//! let products = session.load_path("Stock.xlsx")?;
//! println!("products={products}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod grouping;
pub mod ingestion;
pub mod normalize;
pub mod render;
pub mod session;
pub mod types;
pub mod views;

pub use error::{PriceListError, PriceListResult};
pub use views::{PriceList, PriceLists, ViewKind};
