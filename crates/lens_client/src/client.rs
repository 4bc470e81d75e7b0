use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use lens_core::{AnalysisRequest, ReportLink};
use lens_logging::{lens_error, lens_info, lens_warn};

use crate::analyze::{Analyzer, ClientSettings, ReqwestAnalyzer};
use crate::{local_report_filename, AtomicFileWriter, ClientError, ClientEvent, FailureKind, TransportError};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Analyze(AnalysisRequest),
    DownloadReport(ReportLink),
}

/// Runs requests on a background thread that owns a tokio runtime.
/// Every command produces exactly one event on the sink.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(
        settings: ClientSettings,
        report_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ClientError> {
        let analyzer = Arc::new(ReqwestAnalyzer::new(settings)?);
        Self::with_analyzer(analyzer, report_dir, sink)
    }

    pub fn with_analyzer(
        analyzer: Arc<dyn Analyzer>,
        report_dir: PathBuf,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ClientError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let report_dir = Arc::new(report_dir);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let analyzer = analyzer.clone();
                let sink = sink.clone();
                let report_dir = report_dir.clone();
                runtime.spawn(async move {
                    let event = handle_command(analyzer.as_ref(), &report_dir, command).await;
                    sink.emit(event);
                });
            }
            lens_info!("client worker shutting down");
        });

        Ok(Self { cmd_tx })
    }

    pub fn analyze(&self, request: AnalysisRequest) {
        self.send(ClientCommand::Analyze(request));
    }

    pub fn download_report(&self, link: ReportLink) {
        self.send(ClientCommand::DownloadReport(link));
    }

    fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            lens_error!("client worker is gone; command dropped");
        }
    }
}

async fn handle_command(
    analyzer: &dyn Analyzer,
    report_dir: &Path,
    command: ClientCommand,
) -> ClientEvent {
    match command {
        ClientCommand::Analyze(request) => {
            let result = analyzer.analyze(&request).await;
            if let Err(err) = &result {
                lens_warn!("submission {} failed: {}", request.submission_id, err);
            }
            ClientEvent::AnalysisSettled {
                submission_id: request.submission_id,
                result,
            }
        }
        ClientCommand::DownloadReport(link) => {
            let result = save_report(analyzer, report_dir.to_path_buf(), &link).await;
            match &result {
                Ok(path) => lens_info!("report saved to {:?}", path),
                Err(err) => lens_warn!("report download {} failed: {}", link.href, err),
            }
            ClientEvent::ReportSaved { link, result }
        }
    }
}

async fn save_report(
    analyzer: &dyn Analyzer,
    report_dir: PathBuf,
    link: &ReportLink,
) -> Result<PathBuf, TransportError> {
    let bytes = analyzer.download_report(link).await?;
    let filename = local_report_filename(&link.save_as);
    tokio::task::spawn_blocking(move || {
        AtomicFileWriter::new(report_dir).write(&filename, &bytes)
    })
    .await
    .map_err(|err| TransportError::new(FailureKind::Io, err.to_string()))?
    .map_err(|err| TransportError::new(FailureKind::Io, err.to_string()))
}
