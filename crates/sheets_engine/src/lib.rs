//! Sheets engine: upstream fetching, HTML parsing, listing extraction and
//! sheet rewriting behind the [`Pipeline`] facade.
mod decode;
mod document;
mod engine;
mod extract;
mod fetch;
mod persist;
mod pipeline;
mod transform;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use document::{HtmlDocument, URL_ATTRIBUTES};
pub use engine::BlockingPipeline;
pub use extract::{scan_listing, ExtractError, SpreadsheetExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{AtomicFileWriter, PersistError};
pub use pipeline::{Pipeline, PipelineSettings, DEFAULT_UPSTREAM_TIMEOUT};
pub use transform::{
    rewrite_document, AssetSettings, SheetTransformer, DEFAULT_STATIC_BASE, DOCUMENT_PREAMBLE,
    JQUERY_URL,
};
pub use types::{FailureKind, FetchError};
