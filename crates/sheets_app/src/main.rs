mod cli;
mod config;
mod logging;

use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sheets_core::{ErrorKind, PipelineError, RenderOptions, SheetId};
use sheets_engine::{AtomicFileWriter, BlockingPipeline, Pipeline};
use sheets_logging::{sheets_info, sheets_warn};

use crate::cli::{parse_gid, Args, Command};
use crate::config::{load_config, AppConfig};

fn main() -> ExitCode {
    let args = Args::parse();
    let (config, warning) = load_config(&args.config);
    logging::initialize(config.log_destination, config.verbose);
    if let Some(warning) = warning {
        sheets_warn!("{}", warning);
    }

    match run(args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let pipeline = Pipeline::with_reqwest(config.fetch_settings(), config.pipeline_settings()?)
        .context("building HTTP client")?;
    let pipeline = BlockingPipeline::new(pipeline).context("starting runtime")?;

    match command {
        Command::Listing { spreadsheet } => {
            let listing = pipeline.get_spreadsheet(&spreadsheet.id())?;
            print_json(&listing)
        }
        Command::Subset { spreadsheet, gids } => {
            let gids = gids
                .iter()
                .map(|gid| parse_gid(gid))
                .collect::<anyhow::Result<HashSet<SheetId>>>()?;
            let listing = pipeline.get_spreadsheet_subset(&spreadsheet.id(), &gids)?;
            print_json(&listing)
        }
        Command::Sheet {
            spreadsheet,
            gid,
            options,
            out,
        } => {
            let gid = parse_gid(&gid)?;
            let html = pipeline.get_sheet_html(
                &spreadsheet.id(),
                &gid,
                &RenderOptions::new(options),
            )?;
            match out {
                Some(path) => write_output(path, &html),
                None => {
                    io::stdout().write_all(&html)?;
                    Ok(())
                }
            }
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn write_output(path: PathBuf, html: &[u8]) -> anyhow::Result<()> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("output path {path:?} has no file name"))?
        .to_string();
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let written = AtomicFileWriter::new(dir).write(&filename, html)?;
    sheets_info!("wrote {} bytes to {:?}", html.len(), written);
    Ok(())
}

/// Not found and unresponsive upstreams get their own exit codes (4 and 5)
/// and a message naming the ids, so scripts can tell them apart.
fn report(err: &anyhow::Error) -> ExitCode {
    let Some(pipeline_err) = err.downcast_ref::<PipelineError>() else {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    };
    let target = describe_target(pipeline_err);
    match pipeline_err.kind {
        ErrorKind::NotFound => {
            eprintln!("Not found: {target}. Make sure it exists and is published to the web.");
            ExitCode::from(4)
        }
        ErrorKind::Unresponsive => {
            eprintln!("Google did not respond for {target}. Try again.");
            ExitCode::from(5)
        }
    }
}

fn describe_target(err: &PipelineError) -> String {
    match (&err.sid, &err.gid) {
        (Some(sid), Some(gid)) => format!("sheet {gid} of spreadsheet {sid}"),
        (Some(sid), None) => format!("spreadsheet {sid}"),
        _ => "the spreadsheet".to_string(),
    }
}
