//! Implementation of the conversion run.
//!
//! Builds the core configuration from the parsed arguments, wires the event
//! handlers, runs the batch and prints or writes its results.

use crate::cli::Cli;
use crate::error::{CliErrorContext, CliResult};
use crate::terminal::{self, TerminalEventHandler};

use mediaconv_core::events::{EventDispatcher, JsonEventHandler, LogEventHandler};
use mediaconv_core::{BatchReport, CoreConfig, CoreConfigBuilder, convert_directory};

use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Builds the core configuration from CLI arguments.
pub fn build_config(args: &Cli) -> CliResult<CoreConfig> {
    CoreConfigBuilder::new()
        .input_dir(args.input_dir.clone())
        .output_dir(args.output_dir.clone())
        .maybe_ffmpeg_path(args.ffmpeg_path.clone())
        .build()
}

/// Event handlers for a run: the console sink chosen by `--json`, plus the
/// log mirror that feeds the log file.
fn build_event_dispatcher(json: bool) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    if json {
        dispatcher.add_handler(Arc::new(JsonEventHandler::new()));
    } else {
        dispatcher.add_handler(Arc::new(TerminalEventHandler::new()));
    }
    dispatcher.add_handler(Arc::new(LogEventHandler));
    dispatcher
}

/// Writes the report as pretty JSON.
pub fn write_report(path: &Path, report: &BatchReport) -> CliResult<()> {
    let json = serde_json::to_string_pretty(report).cli_context("Failed to serialize report")?;
    fs::write(path, json).cli_with_context(|| format!("Failed to write report {}", path.display()))?;
    info!("Report written to {}", path.display());
    Ok(())
}

/// Runs one conversion. Returns whether at least one file was converted.
///
/// # Errors
///
/// Fatal run errors (missing input directory, nothing to convert, output
/// directory creation) and failures writing the report.
pub fn run_convert(args: &Cli) -> CliResult<bool> {
    let config = build_config(args)?;
    debug!("Configuration: {:?}", config);

    let events = build_event_dispatcher(args.json);
    let report = convert_directory(&config, &events)?;

    if !args.json {
        let mut stdout = io::stdout().lock();
        terminal::write_summary(&mut stdout, &report, terminal::should_use_color())
            .and_then(|()| stdout.flush())
            .cli_context("Failed to print summary")?;
    }

    if let Some(report_path) = &args.report {
        write_report(report_path, &report)?;
    }

    Ok(report.is_success())
}
