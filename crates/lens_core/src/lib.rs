//! Allegation Lens core: pure upload/submit/render state machine and view-model helpers.
mod effect;
mod endpoint;
mod envelope;
mod msg;
mod notification;
mod results;
mod route;
mod selection;
mod state;
mod submission;
mod update;
mod view_model;

pub use effect::Effect;
pub use endpoint::{ReportLink, ANALYZE_PATH, DOWNLOAD_REPORT_PATH, FILE_FIELD_NAME};
pub use envelope::{FindingRecord, ResponseEnvelope, ResponseStatus};
pub use msg::Msg;
pub use notification::{Notification, NotificationCenter, NotificationId, Severity, NOTIFICATION_TTL};
pub use results::{
    compare_group_keys, format_pin_cite, product_key, FindingGroup, FindingView,
    GroupedFindings, ToggleGlyph, DOCX_CHUNK_PREFIX, ERROR_KEY, FIELD_LABELS, NOT_AVAILABLE,
    NO_PRODUCT_KEY, RESULTS_HEADING,
};
pub use route::{
    route, transport_failure, Routed, NO_FINDINGS_FALLBACK, UNKNOWN_ERROR_FALLBACK,
};
pub use selection::{
    validate_selection, DropZone, FileSelection, SelectedFile, SelectionError,
    ALLOWED_EXTENSIONS,
};
pub use state::{AppState, ResultsPanel};
pub use submission::{AnalysisRequest, FormField, SubmissionController, SubmissionId, SubmissionState};
pub use update::update;
pub use view_model::{AppViewModel, DropZoneView, GroupView, NotificationView, ResultsView};
