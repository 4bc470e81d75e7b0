use crate::SelectedFile;

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight(SubmissionId),
}

impl SubmissionState {
    pub fn is_in_flight(self) -> bool {
        matches!(self, SubmissionState::InFlight(_))
    }
}

/// Extra text field sent alongside the uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything the transport needs to build the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub submission_id: SubmissionId,
    pub file: SelectedFile,
    pub fields: Vec<FormField>,
}

/// Request lifecycle. At most one submission is in flight at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    last_id: SubmissionId,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Idle -> InFlight. Returns `None` while another submission is in flight.
    pub fn begin(&mut self, file: SelectedFile, fields: Vec<FormField>) -> Option<AnalysisRequest> {
        if self.state.is_in_flight() {
            return None;
        }
        self.last_id += 1;
        self.state = SubmissionState::InFlight(self.last_id);
        Some(AnalysisRequest {
            submission_id: self.last_id,
            file,
            fields,
        })
    }

    /// InFlight -> Idle for the matching submission; stale ids are rejected.
    pub fn settle(&mut self, submission_id: SubmissionId) -> bool {
        match self.state {
            SubmissionState::InFlight(current) if current == submission_id => {
                self.state = SubmissionState::Idle;
                true
            }
            _ => false,
        }
    }
}
