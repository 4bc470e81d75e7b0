use lens_logging::{lens_debug, lens_info, lens_warn};

use crate::{
    route, transport_failure, validate_selection, AppState, Effect, Msg, Notification,
    ResponseEnvelope, ResponseStatus, ResultsPanel, Routed, SubmissionId, NOTIFICATION_TTL,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::PickerChanged(files) => {
            if state.selection_mut().pick(files) {
                state.mark_dirty();
            }
        }
        Msg::DragEntered | Msg::DragOver => {
            if state.selection_mut().drag_hover() {
                state.mark_dirty();
            }
        }
        Msg::DragLeft => {
            if state.selection_mut().drag_leave() {
                state.mark_dirty();
            }
        }
        Msg::Dropped(files) => {
            let was_active = state.selection().drop_zone().is_active();
            match state.selection_mut().drop_files(files) {
                Some(file) => {
                    lens_debug!("file dropped: {}", file.name());
                    state.mark_dirty();
                    effects.push(Effect::SyncPickerSelection { file });
                }
                None if was_active => state.mark_dirty(),
                None => {}
            }
        }
        Msg::FormFieldChanged { name, value } => state.set_form_field(name, value),
        Msg::SubmitClicked => submit(&mut state, &mut effects),
        Msg::AnalysisSettled {
            submission_id,
            outcome,
        } => settle(&mut state, submission_id, outcome, &mut effects),
        Msg::GroupToggled { index } => {
            if let Some(panel) = state.results_mut() {
                if panel.groups.toggle(index) {
                    state.mark_dirty();
                }
            }
        }
        Msg::DownloadClicked => match state.results().and_then(|panel| panel.report.clone()) {
            Some(link) => effects.push(Effect::DownloadReport { link }),
            None => notify(
                &mut state,
                Notification::warning("No report is available to download."),
                &mut effects,
            ),
        },
        Msg::ReportDownloaded { outcome } => {
            let notification = match outcome {
                Ok(saved_to) => Notification::success(format!("Report saved to {saved_to}.")),
                Err(description) => {
                    Notification::danger(format!("Report download failed: {description}."))
                }
            };
            notify(&mut state, notification, &mut effects);
        }
        Msg::NotificationExpired { id } => {
            if state.notifications_mut().expire(id) {
                state.mark_dirty();
            }
        }
    }

    (state, effects)
}

fn notify(state: &mut AppState, notification: Notification, effects: &mut Vec<Effect>) {
    let id = state.notifications_mut().show(notification);
    state.mark_dirty();
    effects.push(Effect::ScheduleNotificationExpiry {
        id,
        after: NOTIFICATION_TTL,
    });
}

fn submit(state: &mut AppState, effects: &mut Vec<Effect>) {
    // The submit control is disabled while a request is in flight.
    if state.submission_state().is_in_flight() {
        lens_debug!("submit ignored: a submission is already in flight");
        return;
    }

    // Stale results must never be visible alongside a new request.
    state.set_results(None);
    state.notifications_mut().clear();
    state.mark_dirty();

    let file = match validate_selection(state.selection().selected()).cloned() {
        Ok(file) => file,
        Err(err) => {
            lens_info!("submission rejected client-side: {err}");
            notify(state, Notification::warning(err.to_string()), effects);
            return;
        }
    };

    let fields = state.form_fields().to_vec();
    if let Some(request) = state.submission_mut().begin(file, fields) {
        lens_info!(
            "submitting {} as submission {}",
            request.file.name(),
            request.submission_id
        );
        effects.push(Effect::SubmitAnalysis { request });
    }
}

fn settle(
    state: &mut AppState,
    submission_id: SubmissionId,
    outcome: Result<ResponseEnvelope, String>,
    effects: &mut Vec<Effect>,
) {
    if !state.submission_mut().settle(submission_id) {
        lens_warn!("ignoring settlement for stale submission {submission_id}");
        return;
    }
    state.mark_dirty();

    let envelope = match outcome {
        Ok(envelope) => envelope,
        Err(description) => {
            lens_warn!("submission {submission_id} failed: {description}");
            notify(state, transport_failure(&description), effects);
            return;
        }
    };

    if let ResponseStatus::Unrecognized(status) = &envelope.status {
        lens_warn!("unrecognized response status {status}; treating as error");
    }
    match route(envelope) {
        Routed::Results { groups, report } => {
            lens_info!(
                "submission {submission_id} returned {} finding groups",
                groups.len()
            );
            state.set_results(Some(ResultsPanel { report, groups }));
        }
        Routed::Notify(notification) => notify(state, notification, effects),
    }
}
