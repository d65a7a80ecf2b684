use std::collections::HashSet;
use std::io;

use sheets_core::{PipelineError, RenderOptions, SheetId, SpreadsheetId, SpreadsheetListing};

use crate::pipeline::Pipeline;

/// Synchronous front for thread-per-request callers. Owns a tokio runtime
/// and blocks the calling thread for the duration of each operation.
pub struct BlockingPipeline {
    runtime: tokio::runtime::Runtime,
    pipeline: Pipeline,
}

impl BlockingPipeline {
    pub fn new(pipeline: Pipeline) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime, pipeline })
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn get_spreadsheet(&self, sid: &SpreadsheetId) -> Result<SpreadsheetListing, PipelineError> {
        self.runtime.block_on(self.pipeline.get_spreadsheet(sid))
    }

    pub fn get_spreadsheet_subset(
        &self,
        sid: &SpreadsheetId,
        gids: &HashSet<SheetId>,
    ) -> Result<SpreadsheetListing, PipelineError> {
        self.runtime
            .block_on(self.pipeline.get_spreadsheet_subset(sid, gids))
    }

    pub fn get_sheet_html(
        &self,
        sid: &SpreadsheetId,
        gid: &SheetId,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, PipelineError> {
        self.runtime
            .block_on(self.pipeline.get_sheet_html(sid, gid, options))
    }
}
