// ============================================================================
// mediaconv-cli/src/main.rs
// ============================================================================
//
// MEDIACONV CLI: Main Entry Point
//
// Parses `convert [OPTIONS] <INPUT_DIR> <OUTPUT_DIR>`, installs logging and
// runs the conversion. Exit code 0 when at least one file was converted,
// 1 for everything else (usage errors, fatal run errors, zero successes).
// `--help` and `--version` exit 0.
//
// AI-ASSISTANT-INFO: Entry point for the convert binary

use clap::Parser;
use log::{debug, info};
use mediaconv_cli::logging::init_logging;
use mediaconv_cli::{Cli, run_convert};
use owo_colors::OwoColorize;
use std::process;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    match init_logging(cli.log_dir.as_deref(), cli.verbose) {
        Ok(Some(log_path)) => info!("Logging to {}", log_path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: {}", e),
    }

    match run_convert(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            debug!("Run aborted: {:?}", e);
            if mediaconv_cli::terminal::should_use_color() {
                eprintln!("{} {}", "Error:".bright_red().bold(), e);
            } else {
                eprintln!("Error: {}", e);
            }
            process::exit(1);
        }
    }
}
