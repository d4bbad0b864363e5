use std::sync::{Arc, Mutex};

use price_list::ingestion::{LoadContext, LoadOptions, Severity, StatusNotice, StatusObserver};
use price_list::session::PriceListSession;
use price_list::PriceListError;

#[derive(Default)]
struct RecordingObserver {
    notices: Mutex<Vec<StatusNotice>>,
    alerts: Mutex<Vec<Severity>>,
}

impl StatusObserver for RecordingObserver {
    fn notify(&self, _ctx: &LoadContext, notice: &StatusNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn on_alert(&self, _ctx: &LoadContext, notice: &StatusNotice) {
        self.alerts.lock().unwrap().push(notice.severity);
    }
}

fn session_with(obs: Arc<RecordingObserver>, alert_at_or_above: Severity) -> PriceListSession {
    PriceListSession::new(LoadOptions {
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    })
}

#[test]
fn successful_load_reports_product_count() {
    let obs = Arc::new(RecordingObserver::default());
    let mut session = session_with(obs.clone(), Severity::Error);

    assert_eq!(session.load_path("tests/fixtures/products.csv").unwrap(), 5);

    let notices = obs.notices.lock().unwrap().clone();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Info);
    assert_eq!(notices[0].title, "File processed successfully");
    assert_eq!(notices[0].description, "Loaded 5 products");
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn missing_required_columns_warn_without_alert() {
    let obs = Arc::new(RecordingObserver::default());
    let mut session = session_with(obs.clone(), Severity::Error);

    let err = session.load_path("tests/fixtures/wrong_columns.csv").unwrap_err();
    assert!(matches!(err, PriceListError::NoValidRecords { .. }));
    assert!(session.current().is_none());

    let notices = obs.notices.lock().unwrap().clone();
    assert_eq!(notices, vec![StatusNotice::no_valid_data()]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn unreadable_file_reports_error_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let mut session = session_with(obs.clone(), Severity::Error);
    session.load_path("tests/fixtures/products.csv").unwrap();

    let err = session.load_path("tests/fixtures/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, PriceListError::Csv(_)));

    let notices = obs.notices.lock().unwrap().clone();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[1], StatusNotice::read_failed());
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Error]);

    // The earlier load is still current.
    assert_eq!(session.lists().unwrap().product_count(), 5);
}

#[test]
fn unknown_extension_is_an_error_notice() {
    let obs = Arc::new(RecordingObserver::default());
    let mut session = session_with(obs.clone(), Severity::Warning);

    let err = session.load_path("tests/fixtures/products.pdf").unwrap_err();
    assert!(matches!(err, PriceListError::UnsupportedFormat { .. }));
    assert_eq!(obs.notices.lock().unwrap()[0].severity, Severity::Error);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Error]);
}

#[test]
fn warning_alerts_when_threshold_is_lowered() {
    let obs = Arc::new(RecordingObserver::default());
    let mut session = session_with(obs.clone(), Severity::Warning);

    let _ = session.load_path("tests/fixtures/wrong_columns.csv").unwrap_err();
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Warning]);
}
