use std::time::Duration;

use sheets_core::{
    scan_sheet_descriptors, PipelineError, SheetDescriptor, SpreadsheetId, SpreadsheetListing,
    UpstreamEndpoints,
};
use sheets_logging::{short_id, sheets_info, sheets_warn};

use crate::document::HtmlDocument;
use crate::fetch::{fetch_bounded, Fetcher};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(PipelineError),
    #[error("no sheets found in the listing of spreadsheet {sid}")]
    ListingEmpty { sid: SpreadsheetId },
}

impl From<ExtractError> for PipelineError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Fetch(inner) => inner,
            ExtractError::ListingEmpty { sid } => {
                PipelineError::not_found("listing has no sheet descriptors").with_sid(&sid)
            }
        }
    }
}

/// Reads the title and sheet descriptors of a spreadsheet from its
/// `pubhtml` listing page.
pub struct SpreadsheetExtractor<'a> {
    fetcher: &'a dyn Fetcher,
    endpoints: &'a UpstreamEndpoints,
    timeout: Duration,
}

impl<'a> SpreadsheetExtractor<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, endpoints: &'a UpstreamEndpoints, timeout: Duration) -> Self {
        Self {
            fetcher,
            endpoints,
            timeout,
        }
    }

    pub async fn extract_listing(
        &self,
        sid: &SpreadsheetId,
    ) -> Result<SpreadsheetListing, ExtractError> {
        let url = self.endpoints.listing_url(sid);
        let bytes = fetch_bounded(self.fetcher, &url, self.timeout)
            .await
            .map_err(|err| ExtractError::Fetch(PipelineError::from(err).with_sid(sid)))?;

        let document = HtmlDocument::parse(&bytes);
        let (title, sheets) = scan_listing(&document);
        match SpreadsheetListing::new(title, sheets) {
            Some(listing) => {
                sheets_info!(
                    "listing {} has {} sheets",
                    short_id(sid.as_str()),
                    listing.sheets().len()
                );
                Ok(listing)
            }
            None => {
                sheets_warn!("listing {} has no sheet descriptors", short_id(sid.as_str()));
                Err(ExtractError::ListingEmpty { sid: sid.clone() })
            }
        }
    }
}

/// Title from `head/title` (empty when absent) and the descriptors of the
/// first `<script>` that yields any. Later scripts are never consulted.
pub fn scan_listing(document: &HtmlDocument) -> (String, Vec<SheetDescriptor>) {
    let title = document
        .find_first("head/title")
        .and_then(|title| document.text(title))
        .map(|title| title.trim().to_string())
        .unwrap_or_default();

    for script in document.descendants("script") {
        let Some(text) = document.text(script) else {
            continue;
        };
        let sheets = scan_sheet_descriptors(&text);
        if !sheets.is_empty() {
            return (title, sheets);
        }
    }
    (title, Vec::new())
}
