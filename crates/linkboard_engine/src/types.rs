use std::fmt;
use std::path::PathBuf;

use linkboard_core::Group;

/// Bytes received so far for the document being downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchProgress {
    pub bytes: u64,
    pub total: Option<u64>,
}

/// Where the text behind a load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOrigin {
    Network,
    /// Cache younger than the revalidation window; no request was made.
    FreshCache,
    /// Cache used because the network fetch failed.
    StaleCache,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedGroups {
    pub groups: Vec<Group>,
    pub origin: DocumentOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub link_count: usize,
    pub byte_len: u64,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(FetchProgress),
    GroupsLoaded(Result<LoadedGroups, String>),
    /// Number of URLs written.
    SelectionPersisted(Result<usize, String>),
    ExportFinished(Result<ExportSummary, String>),
}

/// Raw body of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    /// `Content-Type` header as sent, parameters included.
    pub content_type: Option<String>,
    /// URL after redirects.
    pub final_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    EmptyBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Decode => write!(f, "undecodable body"),
            FailureKind::EmptyBody => write!(f, "empty body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
