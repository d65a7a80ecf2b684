use std::fmt;

use sheets_core::{ErrorKind, PipelineError};

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

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        PipelineError::new(err.kind.error_kind(), err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl FailureKind {
    /// Client errors mean the spreadsheet or sheet does not exist (or is not
    /// published). Request timeouts, rate limiting and every other failure are
    /// reported as an unresponsive upstream.
    pub fn error_kind(&self) -> ErrorKind {
        match self {
            FailureKind::HttpStatus(408 | 429) => ErrorKind::Unresponsive,
            FailureKind::HttpStatus(code) if (400..500).contains(code) => ErrorKind::NotFound,
            _ => ErrorKind::Unresponsive,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
