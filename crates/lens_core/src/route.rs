use crate::{GroupedFindings, Notification, ReportLink, ResponseEnvelope, ResponseStatus};

pub const NO_FINDINGS_FALLBACK: &str = "Analysis completed, but no allegations were identified.";
pub const UNKNOWN_ERROR_FALLBACK: &str = "An unknown error occurred during analysis.";

/// Outcome of interpreting one response envelope. Exactly one branch applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    Results {
        groups: GroupedFindings,
        report: Option<ReportLink>,
    },
    Notify(Notification),
}

pub fn route(envelope: ResponseEnvelope) -> Routed {
    let message = envelope.message().map(ToOwned::to_owned);
    match envelope.status {
        ResponseStatus::Success => {
            let report = envelope.excel_filename().map(ReportLink::for_filename);
            match envelope.results {
                Some(results) if !results.is_empty() => Routed::Results {
                    groups: GroupedFindings::from_records(results),
                    report,
                },
                _ => Routed::Notify(Notification::info(
                    message.unwrap_or_else(|| NO_FINDINGS_FALLBACK.to_string()),
                )),
            }
        }
        ResponseStatus::Info => Routed::Notify(Notification::info(
            message.unwrap_or_else(|| NO_FINDINGS_FALLBACK.to_string()),
        )),
        ResponseStatus::Error | ResponseStatus::Unrecognized(_) => {
            Routed::Notify(Notification::danger(
                message.unwrap_or_else(|| UNKNOWN_ERROR_FALLBACK.to_string()),
            ))
        }
    }
}

/// Danger notification for a request that never produced a parseable envelope.
pub fn transport_failure(description: &str) -> Notification {
    Notification::danger(format!(
        "Network or server error: {description}. Please try again."
    ))
}
