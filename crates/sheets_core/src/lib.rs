//! Sheets core: identifiers, listings, upstream URL templates and the
//! sheet-descriptor scanner. Nothing in here performs IO.
mod endpoints;
mod error;
mod ids;
mod listing;
mod pattern;

pub use endpoints::{EndpointError, UpstreamEndpoints, DEFAULT_UPSTREAM_ORIGIN};
pub use error::{ErrorKind, PipelineError};
pub use ids::{RenderOptions, SheetId, SpreadsheetId};
pub use listing::{SheetDescriptor, SpreadsheetListing};
pub use pattern::scan_sheet_descriptors;
