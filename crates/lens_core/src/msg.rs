#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The native picker reported its current file list.
    PickerChanged(Vec<crate::SelectedFile>),
    /// A drag entered the drop zone.
    DragEntered,
    /// A drag is hovering over the drop zone.
    DragOver,
    /// A drag left the drop zone without dropping.
    DragLeft,
    /// Files were dropped onto the drop zone.
    Dropped(Vec<crate::SelectedFile>),
    /// User edited an extra form field.
    FormFieldChanged { name: String, value: String },
    /// User clicked Analyze.
    SubmitClicked,
    /// The analysis request settled. `Err` carries the transport or parse failure description.
    AnalysisSettled {
        submission_id: crate::SubmissionId,
        outcome: Result<crate::ResponseEnvelope, String>,
    },
    /// User clicked a group header.
    GroupToggled { index: usize },
    /// User asked for the report behind the download link.
    DownloadClicked,
    /// Report download finished. `Ok` carries where it was saved.
    ReportDownloaded { outcome: Result<String, String> },
    /// A notification's display time elapsed.
    NotificationExpired { id: crate::NotificationId },
}
