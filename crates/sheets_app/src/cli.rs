use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args as ClapArgs, Parser, Subcommand};
use sheets_core::{SheetId, SpreadsheetId};

use crate::config::DEFAULT_CONFIG_FILENAME;

#[derive(Parser, Debug)]
#[command(about = "Fetch published Google spreadsheets and rewrite sheets into standalone HTML.")]
pub struct Args {
    /// Configuration file (RON). Missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the title and sheets of a spreadsheet as JSON.
    Listing {
        #[command(flatten)]
        spreadsheet: SpreadsheetArg,
    },
    /// Like `listing`, restricted to the given sheet ids.
    Subset {
        #[command(flatten)]
        spreadsheet: SpreadsheetArg,

        /// Sheet ids (gid) to keep.
        #[arg(required = true)]
        gids: Vec<String>,
    },
    /// Render one sheet as a standalone HTML document.
    Sheet {
        #[command(flatten)]
        spreadsheet: SpreadsheetArg,

        /// Sheet id (gid).
        gid: String,

        /// Query string forwarded to the embed URL, e.g. `gridlines=false`.
        #[arg(long, default_value = "")]
        options: String,

        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct SpreadsheetArg {
    /// Spreadsheet id as it appears in the sheet URL.
    pub sid: String,

    /// The id is a publish-to-web token (URLs under `/spreadsheets/d/e/`).
    #[arg(long)]
    pub published: bool,
}

impl SpreadsheetArg {
    pub fn id(&self) -> SpreadsheetId {
        if self.published {
            SpreadsheetId::published(&self.sid)
        } else {
            SpreadsheetId::new(self.sid.as_str())
        }
    }
}

pub fn parse_gid(raw: &str) -> anyhow::Result<SheetId> {
    SheetId::parse(raw).ok_or_else(|| anyhow!("invalid sheet id {raw:?}: expected digits"))
}
