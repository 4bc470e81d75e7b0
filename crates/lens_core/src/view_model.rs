use crate::{FindingView, NotificationId, ReportLink, Severity, SubmissionState, ToggleGlyph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZoneView {
    pub available: bool,
    pub active: bool,
    /// Name of the selected file, replacing the placeholder prompt.
    pub label: Option<String>,
    pub prompt_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub key: String,
    pub expanded: bool,
    pub glyph: ToggleGlyph,
    pub findings: Vec<FindingView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub heading: String,
    pub report: Option<ReportLink>,
    pub groups: Vec<GroupView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub submission: SubmissionState,
    pub submit_enabled: bool,
    pub loading_visible: bool,
    pub drop_zone: DropZoneView,
    pub results: Option<ResultsView>,
    pub notification: Option<NotificationView>,
    pub dirty: bool,
}
