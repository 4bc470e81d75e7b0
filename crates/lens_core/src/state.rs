use crate::view_model::{AppViewModel, DropZoneView, GroupView, NotificationView, ResultsView};
use crate::{
    FileSelection, FindingView, FormField, GroupedFindings, NotificationCenter, ReportLink,
    SubmissionController, SubmissionState, RESULTS_HEADING,
};

/// Rendered outcome of a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPanel {
    pub report: Option<ReportLink>,
    pub groups: GroupedFindings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    selection: FileSelection,
    form_fields: Vec<FormField>,
    submission: SubmissionController,
    results: Option<ResultsPanel>,
    notifications: NotificationCenter,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// State for a host that provides a drop zone.
    pub fn new() -> Self {
        Self::with_drop_zone(true)
    }

    /// Without a drop zone, drag and drop messages are ignored.
    pub fn with_drop_zone(available: bool) -> Self {
        Self {
            selection: FileSelection::new(available),
            form_fields: Vec::new(),
            submission: SubmissionController::new(),
            results: None,
            notifications: NotificationCenter::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let submission = self.submission.state();
        let drop_zone = self.selection.drop_zone();
        let label = self.selection.selected().map(|file| file.name().to_string());
        AppViewModel {
            submission,
            submit_enabled: !submission.is_in_flight(),
            loading_visible: submission.is_in_flight(),
            drop_zone: DropZoneView {
                available: drop_zone.is_available(),
                active: drop_zone.is_active(),
                prompt_visible: label.is_none(),
                label,
            },
            results: self.results.as_ref().map(|panel| ResultsView {
                heading: RESULTS_HEADING.to_string(),
                report: panel.report.clone(),
                groups: panel
                    .groups
                    .groups()
                    .iter()
                    .map(|group| GroupView {
                        key: group.key().to_string(),
                        expanded: group.is_expanded(),
                        glyph: group.glyph(),
                        findings: group.findings().iter().map(FindingView::from_record).collect(),
                    })
                    .collect(),
            }),
            notification: self
                .notifications
                .current()
                .map(|(id, notification)| NotificationView {
                    id,
                    text: notification.text.clone(),
                    severity: notification.severity,
                }),
            dirty: self.dirty,
        }
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission.state()
    }

    /// Returns whether a render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub(crate) fn selection_mut(&mut self) -> &mut FileSelection {
        &mut self.selection
    }

    pub(crate) fn form_fields(&self) -> &[FormField] {
        &self.form_fields
    }

    /// Replaces the value of an existing field or appends a new one.
    pub(crate) fn set_form_field(&mut self, name: String, value: String) {
        match self.form_fields.iter_mut().find(|field| field.name == name) {
            Some(field) => field.value = value,
            None => self.form_fields.push(FormField { name, value }),
        }
    }

    pub(crate) fn submission_mut(&mut self) -> &mut SubmissionController {
        &mut self.submission
    }

    pub(crate) fn results(&self) -> Option<&ResultsPanel> {
        self.results.as_ref()
    }

    pub(crate) fn results_mut(&mut self) -> Option<&mut ResultsPanel> {
        self.results.as_mut()
    }

    pub(crate) fn set_results(&mut self, results: Option<ResultsPanel>) {
        self.results = results;
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }
}
