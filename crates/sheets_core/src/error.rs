use std::fmt;

use crate::{SheetId, SpreadsheetId};

/// The two user-visible failure outcomes of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Upstream resource absent or structurally empty.
    NotFound,
    /// Upstream timed out or the transport failed.
    Unresponsive,
}

impl ErrorKind {
    /// HTTP status a serving layer should answer with.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Unresponsive => 504,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "spreadsheet not found"),
            ErrorKind::Unresponsive => write!(f, "upstream not responding"),
        }
    }
}

/// Pipeline failure with the ids of the request that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineError {
    pub kind: ErrorKind,
    pub sid: Option<SpreadsheetId>,
    pub gid: Option<SheetId>,
    pub detail: String,
}

impl PipelineError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            sid: None,
            gid: None,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, detail)
    }

    pub fn unresponsive(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unresponsive, detail)
    }

    pub fn with_sid(mut self, sid: &SpreadsheetId) -> Self {
        self.sid = Some(sid.clone());
        self
    }

    pub fn with_gid(mut self, gid: &SheetId) -> Self {
        self.gid = Some(gid.clone());
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match (&self.sid, &self.gid) {
            (Some(sid), Some(gid)) => write!(f, " (sid {sid}, gid {gid})")?,
            (Some(sid), None) => write!(f, " (sid {sid})")?,
            _ => {}
        }
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for PipelineError {}
