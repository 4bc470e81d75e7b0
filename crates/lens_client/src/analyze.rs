use std::time::Duration;

use futures_util::StreamExt;
use lens_core::{AnalysisRequest, ReportLink, ResponseEnvelope, ANALYZE_PATH, FILE_FIELD_NAME};
use lens_logging::{lens_debug, lens_info};
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::{FailureKind, TransportError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub server_url: String,
    pub connect_timeout: Duration,
    /// Overall request timeout. `None` lets a slow analysis run indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_report_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_report_bytes: 50 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Analyzer: Send + Sync {
    /// Uploads the selected document and parses the response envelope.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ResponseEnvelope, TransportError>;

    /// Fetches the bytes behind a report download link.
    async fn download_report(&self, link: &ReportLink) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalyzer {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestAnalyzer {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let base = Url::parse(&settings.server_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    /// Resolves a root-relative endpoint path against the configured server.
    pub fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn build_form(&self, request: &AnalysisRequest) -> Result<Form, TransportError> {
        let file = &request.file;
        let bytes = tokio::fs::read(file.path()).await.map_err(|err| {
            TransportError::new(
                FailureKind::Io,
                format!("could not read {}: {err}", file.name()),
            )
        })?;
        let mime = mime_guess::from_path(file.name()).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(mime.essence_str())
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;

        let mut form = Form::new().part(FILE_FIELD_NAME, part);
        for field in &request.fields {
            form = form.text(field.name.clone(), field.value.clone());
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl Analyzer for ReqwestAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<ResponseEnvelope, TransportError> {
        let url = self.endpoint(ANALYZE_PATH)?;
        let form = self.build_form(request).await?;

        lens_info!(
            "POST {} submission={} file={}",
            url,
            request.submission_id,
            request.file.name()
        );
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        lens_debug!(
            "submission={} status={} body_len={}",
            request.submission_id,
            status,
            body.len()
        );

        // Error statuses usually still carry an envelope with the server's message.
        match ResponseEnvelope::from_slice(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )),
            Err(err) => Err(TransportError::new(FailureKind::Decode, err.to_string())),
        }
    }

    async fn download_report(&self, link: &ReportLink) -> Result<Vec<u8>, TransportError> {
        let url = self.endpoint(&link.href)?;
        lens_info!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_report_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "report too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(TransportError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "report too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
