use std::fmt;

use serde::Serialize;

const PUBLISHED_PREFIX: &str = "e/";

/// Identifier of a published spreadsheet, passed through unmodified to the
/// upstream URL templates.
///
/// Spreadsheets published via "publish to web" live under an extra `e/`
/// path segment; [`SpreadsheetId::published`] builds that form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SpreadsheetId(String);

impl SpreadsheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn published(token: &str) -> Self {
        Self(format!("{PUBLISHED_PREFIX}{token}"))
    }

    pub fn is_published(&self) -> bool {
        self.0.starts_with(PUBLISHED_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric sheet id (`gid`), kept as its decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SheetId(String);

impl SheetId {
    /// Accepts one or more ASCII digits and nothing else.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query-string fragment forwarded verbatim to the single-sheet embed URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions(String);

impl RenderOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn as_query(&self) -> &str {
        &self.0
    }
}
