//! Load lifecycle.
//!
//! A [`PriceListSession`] holds the price lists derived from the most recent successful load.
//! Each load either fully replaces them or, on any failure, leaves them untouched; the outcome is
//! reported once to the configured [`StatusObserver`].

use std::path::Path;

use tracing::{debug, info};

use crate::error::{PriceListError, PriceListResult};
use crate::ingestion::{read_rows, InputFormat, LoadContext, LoadOptions, Severity, StatusNotice};
use crate::normalize::{normalize_rows, NormalizeReport};
use crate::types::RawRow;
use crate::views::PriceLists;

/// Normalize `rows` and build both views.
///
/// Fails with [`PriceListError::NoValidRecords`] if no row survives normalization.
pub fn build_price_lists(rows: &[RawRow]) -> PriceListResult<(PriceLists, NormalizeReport)> {
    let (records, report) = normalize_rows(rows);
    if records.is_empty() {
        return Err(PriceListError::NoValidRecords {
            input_rows: report.input_rows,
        });
    }
    Ok((PriceLists::from_records(&records), report))
}

/// Severity a failed load is reported with.
pub fn severity_for_error(e: &PriceListError) -> Severity {
    match e {
        PriceListError::NoValidRecords { .. } => Severity::Warning,
        _ => Severity::Error,
    }
}

fn notice_for_error(e: &PriceListError) -> StatusNotice {
    match severity_for_error(e) {
        Severity::Warning => StatusNotice::no_valid_data(),
        _ => StatusNotice::read_failed(),
    }
}

/// The current price lists plus where they came from.
#[derive(Debug, Clone)]
pub struct LoadedPriceLists {
    pub source: String,
    pub lists: PriceLists,
    pub report: NormalizeReport,
}

/// Holds the state of the most recent successful load.
#[derive(Debug, Default)]
pub struct PriceListSession {
    options: LoadOptions,
    current: Option<LoadedPriceLists>,
}

impl PriceListSession {
    /// Create a session with the given load options.
    pub fn new(options: LoadOptions) -> Self {
        Self { options, current: None }
    }

    /// The load options in use.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// The price lists from the last successful load, if any.
    pub fn current(&self) -> Option<&LoadedPriceLists> {
        self.current.as_ref()
    }

    /// Shortcut for the current lists.
    pub fn lists(&self) -> Option<&PriceLists> {
        self.current.as_ref().map(|c| &c.lists)
    }

    /// Read, normalize and group a file, replacing the current lists on success.
    ///
    /// Returns the number of products loaded.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> PriceListResult<usize> {
        let path = path.as_ref();
        let ctx = LoadContext {
            source: path.display().to_string(),
            format: self.options.format.or_else(|| InputFormat::from_path(path).ok()),
        };

        let result = read_rows(path, &self.options).and_then(|rows| {
            debug!(source = %ctx.source, rows = rows.len(), "read source rows");
            self.apply(&ctx, &rows)
        });
        self.report(&ctx, result)
    }

    /// Normalize and group rows supplied by an external reader, replacing the current lists on
    /// success. `source` labels the rows in notices.
    pub fn load_rows(&mut self, source: &str, rows: &[RawRow]) -> PriceListResult<usize> {
        let ctx = LoadContext {
            source: source.to_string(),
            format: None,
        };
        let result = self.apply(&ctx, rows);
        self.report(&ctx, result)
    }

    /// Drop the current lists.
    pub fn clear(&mut self) {
        self.current = None;
    }

    fn apply(&mut self, ctx: &LoadContext, rows: &[RawRow]) -> PriceListResult<usize> {
        let (lists, report) = build_price_lists(rows)?;
        let products = lists.product_count();
        self.current = Some(LoadedPriceLists {
            source: ctx.source.clone(),
            lists,
            report,
        });
        info!(
            source = %ctx.source,
            products,
            dropped = report.dropped,
            "loaded price lists"
        );
        Ok(products)
    }

    fn report(&self, ctx: &LoadContext, result: PriceListResult<usize>) -> PriceListResult<usize> {
        if let Some(obs) = self.options.observer.as_ref() {
            let notice = match &result {
                Ok(products) => StatusNotice::loaded(*products),
                Err(e) => {
                    debug!(source = %ctx.source, error = %e, "load failed");
                    notice_for_error(e)
                }
            };
            obs.notify(ctx, &notice);
            if result.is_err() && notice.severity >= self.options.alert_at_or_above {
                obs.on_alert(ctx, &notice);
            }
        }
        result
    }
}
