use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use sheets_core::{
    PipelineError, RenderOptions, SheetId, SpreadsheetId, SpreadsheetListing, UpstreamEndpoints,
};
use sheets_logging::{short_id, sheets_debug};

use crate::extract::SpreadsheetExtractor;
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::transform::{AssetSettings, SheetTransformer};
use crate::FetchError;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub endpoints: UpstreamEndpoints,
    pub timeout: Duration,
    pub assets: AssetSettings,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            endpoints: UpstreamEndpoints::default(),
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
            assets: AssetSettings::default(),
        }
    }
}

/// Entry points for the serving layer. Stateless; clones share the fetcher.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    settings: Arc<PipelineSettings>,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, settings: PipelineSettings) -> Self {
        Self {
            fetcher,
            settings: Arc::new(settings),
        }
    }

    pub fn with_reqwest(fetch: FetchSettings, settings: PipelineSettings) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::new(fetch)?;
        Ok(Self::new(Arc::new(fetcher), settings))
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Title and sheets of a spreadsheet. An empty listing is `NotFound`.
    pub async fn get_spreadsheet(
        &self,
        sid: &SpreadsheetId,
    ) -> Result<SpreadsheetListing, PipelineError> {
        sheets_debug!("get_spreadsheet {}", short_id(sid.as_str()));
        let extractor = SpreadsheetExtractor::new(
            self.fetcher.as_ref(),
            &self.settings.endpoints,
            self.settings.timeout,
        );
        Ok(extractor.extract_listing(sid).await?)
    }

    /// The listing restricted to `gids`, in listing order. `NotFound` when
    /// none of the requested sheets exist.
    pub async fn get_spreadsheet_subset(
        &self,
        sid: &SpreadsheetId,
        gids: &HashSet<SheetId>,
    ) -> Result<SpreadsheetListing, PipelineError> {
        let listing = self.get_spreadsheet(sid).await?;
        listing.subset(gids).ok_or_else(|| {
            PipelineError::not_found("none of the requested sheets exist").with_sid(sid)
        })
    }

    /// One sheet rewritten into a standalone document. No listing lookup.
    pub async fn get_sheet_html(
        &self,
        sid: &SpreadsheetId,
        gid: &SheetId,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, PipelineError> {
        sheets_debug!("get_sheet_html {}/{}", short_id(sid.as_str()), gid);
        let transformer = SheetTransformer::new(
            self.fetcher.as_ref(),
            &self.settings.endpoints,
            &self.settings.assets,
            self.settings.timeout,
        );
        transformer.render_sheet(sid, gid, options).await
    }
}
