use url::Url;

use crate::{RenderOptions, SheetId, SpreadsheetId};

pub const DEFAULT_UPSTREAM_ORIGIN: &str = "https://docs.google.com";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid upstream origin {origin:?}: {message}")]
    InvalidOrigin { origin: String, message: String },
}

/// Upstream URL templates, rooted at a single http(s) origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEndpoints {
    origin: String,
    base: Url,
}

impl UpstreamEndpoints {
    /// Only the origin part of `origin` is kept; any path or query is dropped.
    pub fn new(origin: &str) -> Result<Self, EndpointError> {
        let invalid = |message: String| EndpointError::InvalidOrigin {
            origin: origin.to_string(),
            message,
        };
        let parsed = Url::parse(origin).map_err(|err| invalid(err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        let origin = parsed.origin().ascii_serialization();
        let base = Url::parse(&format!("{origin}/")).map_err(|err| invalid(err.to_string()))?;
        Ok(Self { origin, base })
    }

    /// Scheme, host and port without a trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn listing_url(&self, sid: &SpreadsheetId) -> String {
        format!("{}/spreadsheets/d/{}/pubhtml?widget=true", self.origin, sid)
    }

    /// The `&` separator is always present, even for empty options.
    pub fn sheet_url(&self, sid: &SpreadsheetId, gid: &SheetId, options: &RenderOptions) -> String {
        format!(
            "{}/spreadsheets/d/{}/htmlembed/sheet?gid={}&{}",
            self.origin,
            sid,
            gid,
            options.as_query()
        )
    }

    /// Resolves `reference` against the upstream origin. Absolute references
    /// are returned unchanged.
    pub fn absolutize(&self, reference: &str) -> String {
        let trimmed = reference.trim();
        if trimmed.is_empty() || Url::parse(trimmed).is_ok() {
            return reference.to_string();
        }
        match self.base.join(trimmed) {
            Ok(url) => url.into(),
            Err(_) => format!("{}{}", self.origin, trimmed),
        }
    }
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        let base = Url::parse("https://docs.google.com/").expect("static upstream origin");
        Self {
            origin: DEFAULT_UPSTREAM_ORIGIN.to_string(),
            base,
        }
    }
}
