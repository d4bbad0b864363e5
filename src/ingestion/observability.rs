//! User-visible status notices and the observers that receive them.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{error, info, warn};

use super::unified::InputFormat;

/// Severity of a status notice. Also used as the alerting threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// A load completed.
    Info,
    /// The file was read but nothing usable was in it.
    Warning,
    /// The file could not be read or parsed.
    Error,
}

/// A short human-readable notice for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl StatusNotice {
    /// Products were loaded.
    pub fn loaded(products: usize) -> Self {
        Self {
            severity: Severity::Info,
            title: "File processed successfully".to_string(),
            description: format!("Loaded {products} products"),
        }
    }

    /// No row survived normalization.
    pub fn no_valid_data() -> Self {
        Self {
            severity: Severity::Warning,
            title: "No valid data found".to_string(),
            description: "Make sure your Excel file contains the required columns".to_string(),
        }
    }

    /// The source could not be read or parsed.
    pub fn read_failed() -> Self {
        Self {
            severity: Severity::Error,
            title: "Error processing file".to_string(),
            description: "Please check your Excel file format and try again".to_string(),
        }
    }
}

impl fmt::Display for StatusNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Path of the file, or a caller-chosen label for in-memory rows.
    pub source: String,
    /// Input format, when known.
    pub format: Option<InputFormat>,
}

/// Observer interface for load outcomes.
///
/// Implementors can show toasts, record logs, or trigger alerts.
pub trait StatusObserver: Send + Sync {
    /// Called once per load attempt with its outcome.
    fn notify(&self, _ctx: &LoadContext, _notice: &StatusNotice) {}

    /// Called in addition to [`Self::notify`] when the notice meets the alert threshold.
    fn on_alert(&self, _ctx: &LoadContext, _notice: &StatusNotice) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn StatusObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn StatusObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl StatusObserver for CompositeObserver {
    fn notify(&self, ctx: &LoadContext, notice: &StatusNotice) {
        for o in &self.observers {
            o.notify(ctx, notice);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, notice: &StatusNotice) {
        for o in &self.observers {
            o.on_alert(ctx, notice);
        }
    }
}

/// Emits notices as `tracing` events at the matching level.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn notify(&self, ctx: &LoadContext, notice: &StatusNotice) {
        let format = ctx.format.map(|f| format!("{f:?}")).unwrap_or_default();
        match notice.severity {
            Severity::Info => info!(source = %ctx.source, format = %format, "{notice}"),
            Severity::Warning => warn!(source = %ctx.source, format = %format, "{notice}"),
            Severity::Error => error!(source = %ctx.source, format = %format, "{notice}"),
        }
    }

    fn on_alert(&self, ctx: &LoadContext, notice: &StatusNotice) {
        error!(source = %ctx.source, severity = ?notice.severity, "[ALERT] {notice}");
    }
}

/// Appends notices to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends notices to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl StatusObserver for FileObserver {
    fn notify(&self, ctx: &LoadContext, notice: &StatusNotice) {
        self.append_line(&format!(
            "{} {:?} source={} format={:?} {}",
            unix_ts(),
            notice.severity,
            ctx.source,
            ctx.format,
            notice
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, notice: &StatusNotice) {
        self.append_line(&format!(
            "{} ALERT {:?} source={} {}",
            unix_ts(),
            notice.severity,
            ctx.source,
            notice
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::{FileObserver, LoadContext, Severity, StatusNotice, StatusObserver};

    #[test]
    fn severities_are_ordered() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn file_observer_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.log");
        let obs = FileObserver::new(&path);
        let ctx = LoadContext {
            source: "prices.xlsx".to_string(),
            format: None,
        };

        obs.notify(&ctx, &StatusNotice::loaded(3));
        obs.on_alert(&ctx, &StatusNotice::read_failed());

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("source=prices.xlsx"));
        assert!(lines[0].contains("Loaded 3 products"));
        assert!(lines[1].contains("ALERT Error"));
    }
}
