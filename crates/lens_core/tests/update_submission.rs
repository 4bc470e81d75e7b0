use std::sync::Once;

use lens_core::{
    update, AnalysisRequest, AppState, Effect, FormField, Msg, ResponseEnvelope, ResponseStatus,
    SelectedFile, Severity, SubmissionState, NOTIFICATION_TTL,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(lens_logging::initialize_for_tests);
}

fn with_file(name: &str) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::PickerChanged(vec![SelectedFile::from_path(name)]),
    );
    state
}

fn submit(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::SubmitClicked)
}

fn submitted_request(effects: &[Effect]) -> AnalysisRequest {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::SubmitAnalysis { request } => Some(request.clone()),
            _ => None,
        })
        .expect("submit effect")
}

fn envelope(value: serde_json::Value) -> ResponseEnvelope {
    serde_json::from_value(value).expect("envelope")
}

fn settle(state: AppState, submission_id: u64, outcome: Result<ResponseEnvelope, String>) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::AnalysisSettled {
            submission_id,
            outcome,
        },
    )
}

#[test]
fn submit_without_file_warns_and_stays_idle() {
    init_logging();
    let (state, effects) = submit(AppState::new());
    let view = state.view();

    assert_eq!(view.submission, SubmissionState::Idle);
    assert!(view.submit_enabled);
    assert!(!view.loading_visible);
    let notification = view.notification.expect("warning");
    assert_eq!(notification.severity, Severity::Warning);
    assert_eq!(notification.text, "Please select a file to analyze.");
    assert_eq!(
        effects,
        vec![Effect::ScheduleNotificationExpiry {
            id: notification.id,
            after: NOTIFICATION_TTL,
        }]
    );
}

#[test]
fn disallowed_extension_is_rejected_before_network() {
    init_logging();
    let (state, effects) = submit(with_file("brief.txt"));

    assert_eq!(state.submission_state(), SubmissionState::Idle);
    assert!(effects
        .iter()
        .all(|effect| !matches!(effect, Effect::SubmitAnalysis { .. })));
    let notification = state.view().notification.expect("warning");
    assert_eq!(notification.severity, Severity::Warning);
    assert!(notification.text.contains("brief.txt"));
}

#[test]
fn allowed_extensions_pass_in_any_case() {
    init_logging();
    for name in ["brief.pdf", "brief.DOCX", "Brief.Pdf"] {
        let (state, effects) = submit(with_file(name));
        assert!(state.submission_state().is_in_flight(), "{name}");
        assert_eq!(submitted_request(&effects).file.name(), name);
    }
}

#[test]
fn valid_submit_goes_in_flight_and_carries_form_fields() {
    init_logging();
    let state = with_file("/docs/complaint.pdf");
    let (state, _) = update(
        state,
        Msg::FormFieldChanged {
            name: "case".to_string(),
            value: "A-1".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FormFieldChanged {
            name: "case".to_string(),
            value: "A-2".to_string(),
        },
    );

    let (state, effects) = submit(state);
    let view = state.view();

    assert_eq!(view.submission, SubmissionState::InFlight(1));
    assert!(!view.submit_enabled);
    assert!(view.loading_visible);
    assert_eq!(view.notification, None);
    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            request: AnalysisRequest {
                submission_id: 1,
                file: SelectedFile::from_path("/docs/complaint.pdf"),
                fields: vec![FormField::new("case", "A-2")],
            }
        }]
    );
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = submit(with_file("complaint.pdf"));
    let before = state.clone();

    let (state, effects) = submit(state);

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn submit_clears_previous_results_and_notification() {
    init_logging();
    let (state, effects) = submit(with_file("complaint.pdf"));
    let id = submitted_request(&effects).submission_id;
    let (state, _) = settle(
        state,
        id,
        Ok(envelope(json!({
            "status": "success",
            "results": [{"Product_Name": "Widget"}],
            "excel_filename": "report.xlsx"
        }))),
    );
    assert!(state.view().results.is_some());
    let (state, _) = update(state, Msg::DownloadClicked);
    let (state, _) = update(
        state,
        Msg::ReportDownloaded {
            outcome: Ok("reports/report.xlsx".to_string()),
        },
    );
    assert!(state.view().notification.is_some());

    let (state, _) = submit(state);
    let view = state.view();

    assert_eq!(view.results, None);
    assert_eq!(view.notification, None);
    assert!(view.loading_visible);
}

#[test]
fn every_settlement_restores_idle() {
    init_logging();
    let outcomes = vec![
        Ok(envelope(json!({"status": "success", "results": [{"Product_Name": "A"}]}))),
        Ok(envelope(json!({"status": "success", "results": []}))),
        Ok(envelope(json!({"status": "info", "message": "Nothing found."}))),
        Ok(envelope(json!({"status": "error", "message": "Processing error: boom"}))),
        Ok(envelope(json!({"status": "weird"}))),
        Err("connection refused".to_string()),
    ];

    for outcome in outcomes {
        let (state, effects) = submit(with_file("complaint.pdf"));
        let id = submitted_request(&effects).submission_id;
        let (state, _) = settle(state, id, outcome.clone());
        let view = state.view();

        assert_eq!(view.submission, SubmissionState::Idle, "{outcome:?}");
        assert!(view.submit_enabled, "{outcome:?}");
        assert!(!view.loading_visible, "{outcome:?}");
    }
}

#[test]
fn transport_failure_surfaces_danger_with_description() {
    init_logging();
    let (state, effects) = submit(with_file("complaint.pdf"));
    let id = submitted_request(&effects).submission_id;

    let (state, effects) = settle(state, id, Err("http status 502".to_string()));
    let notification = state.view().notification.expect("danger");

    assert_eq!(notification.severity, Severity::Danger);
    assert_eq!(
        notification.text,
        "Network or server error: http status 502. Please try again."
    );
    assert_eq!(effects.len(), 1);
}

#[test]
fn success_with_empty_results_notifies_with_fallback() {
    init_logging();
    let (state, effects) = submit(with_file("complaint.pdf"));
    let id = submitted_request(&effects).submission_id;

    let (state, effects) = settle(
        state,
        id,
        Ok(envelope(json!({"status": "success", "results": []}))),
    );
    let view = state.view();

    assert_eq!(view.results, None);
    let notification = view.notification.expect("info");
    assert_eq!(notification.severity, Severity::Info);
    assert_eq!(
        notification.text,
        "Analysis completed, but no allegations were identified."
    );
    let scheduled = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::ScheduleNotificationExpiry { .. }))
        .count();
    assert_eq!(scheduled, 1);
}

#[test]
fn unrecognized_status_is_treated_as_error() {
    init_logging();
    let (state, effects) = submit(with_file("complaint.pdf"));
    let id = submitted_request(&effects).submission_id;

    let payload = envelope(json!({"status": "partial"}));
    assert_eq!(payload.status, ResponseStatus::Unrecognized("partial".to_string()));
    let (state, _) = settle(state, id, Ok(payload));
    let notification = state.view().notification.expect("danger");

    assert_eq!(notification.severity, Severity::Danger);
    assert_eq!(notification.text, "An unknown error occurred during analysis.");
}

#[test]
fn stale_settlement_changes_nothing() {
    init_logging();
    let (state, _) = submit(with_file("complaint.pdf"));
    let before = state.clone();

    let (state, effects) = settle(state, 99, Err("late".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn submission_ids_increase_across_requests() {
    init_logging();
    let (state, effects) = submit(with_file("complaint.pdf"));
    let first = submitted_request(&effects).submission_id;
    let (state, _) = settle(state, first, Err("offline".to_string()));

    let (_, effects) = submit(state);
    let second = submitted_request(&effects).submission_id;

    assert!(second > first);
}
