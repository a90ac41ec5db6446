use std::sync::mpsc;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client, Response, Url};

use crate::{EngineEvent, FailureKind, FetchError, FetchOutput, FetchProgress};

/// Limits applied to every document download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Media types accepted without parameters; raw-file hosts vary.
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: [
                "text/plain",
                "text/markdown",
                "text/x-markdown",
                "application/octet-stream",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Forwards progress onto the engine's event channel.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Discards progress; for one-shot loads nobody watches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: EngineEvent) {}
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError>;
}

/// HTTP fetcher holding one client for the lifetime of the engine.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn check_length(&self, len: u64) -> Result<(), FetchError> {
        if len > self.settings.max_bytes {
            return Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(len),
                },
                "response too large",
            ));
        }
        Ok(())
    }

    /// A missing header is let through; decoding decides later.
    fn check_content_type(&self, response: &Response) -> Result<Option<String>, FetchError> {
        let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        else {
            return Ok(None);
        };
        let media_type = content_type.split(';').next().unwrap_or_default().trim();
        let allowed = self
            .settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(media_type));
        if !allowed {
            return Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: content_type.to_string(),
                },
                "unsupported content type",
            ));
        }
        Ok(Some(content_type.to_string()))
    }

    async fn read_body(
        &self,
        response: Response,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<u8>, FetchError> {
        let total = response.content_length();
        sink.emit(EngineEvent::Progress(FetchProgress { bytes: 0, total }));

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            self.check_length((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
            sink.emit(EngineEvent::Progress(FetchProgress {
                bytes: body.len() as u64,
                total,
            }));
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError> {
        let url = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        if let Some(len) = response.content_length() {
            self.check_length(len)?;
        }
        let content_type = self.check_content_type(&response)?;
        let final_url = response.url().to_string();
        let bytes = self.read_body(response, sink).await?;

        Ok(FetchOutput {
            bytes,
            content_type,
            final_url,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
