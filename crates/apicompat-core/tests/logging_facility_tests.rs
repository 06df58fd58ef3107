#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apicompat_core::compat::check_compat;
use apicompat_core::errors::{ApiCompatError, ExErrorKind};
use apicompat_core::logging_facility::test_capture::init_test_capture;
use apicompat_core::snapshot::MemorySnapshotStore;
use apicompat_core::workflow::{run_check, CheckOptions};
use apicompat_core::{log_op_end, log_op_error, log_op_start};
use apicompat_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use common::{ident, project_of, type_decl};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ApiCompatError::MissingField {
        field: "project".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events_for_op(op_name);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(
        events[0].field("err_code"),
        Some(ExErrorKind::MissingField.code())
    );
}

#[test]
fn test_check_compat_logs_verdict() {
    let capture = init_test_capture();
    let older = project_of(vec![type_decl("LoggedVerdictSymbol", ident("int"))]);
    let newer = project_of(vec![]);

    let report = check_compat(&older, &newer);
    assert!(!report.compatible);

    let verdicts = capture.count_events(|e| {
        e.op.as_deref() == Some("check_compat")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("compatible") == Some("false")
    });
    assert!(verdicts >= 1);
}

#[test]
fn test_run_check_events_carry_run_id() {
    let capture = init_test_capture();
    let mut store = MemorySnapshotStore::new();
    let outcome = run_check(
        &mut store,
        project_of(vec![type_decl("A", ident("int"))]),
        &CheckOptions::default(),
    )
    .unwrap();

    let run_id = outcome.run_id.to_string();
    let events: Vec<_> = capture
        .events_for_op("run_check")
        .into_iter()
        .filter(|e| e.run_id.as_deref() == Some(run_id.as_str()))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field("persisted"), Some("true"));
}
