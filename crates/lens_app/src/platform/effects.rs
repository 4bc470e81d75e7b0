use std::sync::{mpsc, Arc};
use std::thread;

use lens_client::{ClientError, ClientEvent, ClientHandle, EventSink};
use lens_core::{Effect, Msg};
use lens_logging::{lens_debug, lens_info};

use super::app::Inbound;
use super::config::LensConfig;

/// Executes core effects against the analysis client and the timer threads.
pub struct EffectRunner {
    client: ClientHandle,
    inbox: mpsc::Sender<Inbound>,
}

impl EffectRunner {
    pub fn new(config: &LensConfig, inbox: mpsc::Sender<Inbound>) -> Result<Self, ClientError> {
        let sink = Arc::new(InboxSink {
            inbox: inbox.clone(),
        });
        let client = ClientHandle::new(config.client_settings(), config.report_dir.clone(), sink)?;
        Ok(Self { client, inbox })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SyncPickerSelection { file } => {
                    // The terminal has no separate picker widget to mirror into.
                    lens_debug!("picker now shows {}", file.name());
                }
                Effect::SubmitAnalysis { request } => self.client.analyze(request),
                Effect::ScheduleNotificationExpiry { id, after } => {
                    let inbox = self.inbox.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = inbox.send(Inbound::Msg(Msg::NotificationExpired { id }));
                    });
                }
                Effect::DownloadReport { link } => {
                    lens_info!("downloading report {}", link.href);
                    self.client.download_report(link);
                }
            }
        }
    }
}

struct InboxSink {
    inbox: mpsc::Sender<Inbound>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.inbox.send(Inbound::Msg(map_event(event)));
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::AnalysisSettled {
            submission_id,
            result,
        } => Msg::AnalysisSettled {
            submission_id,
            outcome: result.map_err(|err| err.to_string()),
        },
        ClientEvent::ReportSaved { result, .. } => Msg::ReportDownloaded {
            outcome: result
                .map(|path| path.display().to_string())
                .map_err(|err| err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use lens_client::ClientEvent;
    use lens_core::{Msg, ReportLink, ResponseEnvelope};

    use super::map_event;

    #[test]
    fn settled_analysis_keeps_its_submission_id() {
        let envelope = ResponseEnvelope::from_slice(br#"{"status":"info","message":"nothing"}"#)
            .unwrap();
        let msg = map_event(ClientEvent::AnalysisSettled {
            submission_id: 4,
            result: Ok(envelope.clone()),
        });
        assert_eq!(
            msg,
            Msg::AnalysisSettled {
                submission_id: 4,
                outcome: Ok(envelope),
            }
        );
    }

    #[test]
    fn saved_report_carries_its_path() {
        let msg = map_event(ClientEvent::ReportSaved {
            link: ReportLink::for_filename("r.xlsx"),
            result: Ok(PathBuf::from("reports").join("r.xlsx")),
        });
        let Msg::ReportDownloaded { outcome } = msg else {
            panic!("unexpected msg {msg:?}");
        };
        assert!(outcome.unwrap().ends_with("r.xlsx"));
    }
}
