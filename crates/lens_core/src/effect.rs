use std::time::Duration;

use crate::{AnalysisRequest, NotificationId, ReportLink, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Mirror a dropped file into the picker so both modalities agree.
    SyncPickerSelection { file: SelectedFile },
    /// Issue the multipart POST to the analysis endpoint.
    SubmitAnalysis { request: AnalysisRequest },
    /// Deliver `Msg::NotificationExpired { id }` after `after`.
    ScheduleNotificationExpiry { id: NotificationId, after: Duration },
    DownloadReport { link: ReportLink },
}
