// ============================================================================
// mediaconv-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Log File Backends for the `log` Facade
//
// Two setups exist:
// - Without --log-dir, env_logger on stderr, honouring RUST_LOG
//   (default "warn", "debug" with --verbose).
// - With --log-dir, a fern dispatch: a console chain on stderr plus a
//   timestamped debug-level log file.
//
// Event lines (target EVENT_LOG_TARGET) are never printed by the console
// chain because the terminal handler already shows them.
//
// AI-ASSISTANT-INFO: Logging initialisation for the convert binary

use crate::error::{CliErrorContext, CliResult};

use log::LevelFilter;
use mediaconv_core::events::EVENT_LOG_TARGET;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// # Example
/// ```
/// let log_filename = format!("mediaconv_log_{}.txt", mediaconv_cli::logging::get_timestamp());
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// File name of the run log for a given timestamp.
pub fn log_file_name(timestamp: &str) -> String {
    format!("mediaconv_convert_run_{}.log", timestamp)
}

fn console_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Warn }
}

/// Installs the global logger. Returns the log file path when one was opened.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> CliResult<Option<PathBuf>> {
    match log_dir {
        Some(dir) => init_file_logging(dir, verbose).map(Some),
        None => {
            let default_filter = if verbose { "debug" } else { "warn" };
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
                .filter_module(EVENT_LOG_TARGET, LevelFilter::Off)
                .format_timestamp(None)
                .try_init()
                .cli_context("Failed to initialise logger")?;
            Ok(None)
        }
    }
}

fn init_file_logging(log_dir: &Path, verbose: bool) -> CliResult<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .cli_with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join(log_file_name(&get_timestamp()));
    let log_file = fern::log_file(&log_path)
        .cli_with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("{} {}", record.level(), message)))
        .level(console_level(verbose))
        .filter(|metadata| metadata.target() != EVENT_LOG_TARGET)
        .chain(std::io::stderr());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(LevelFilter::Debug)
        .chain(log_file);

    fern::Dispatch::new()
        .chain(console)
        .chain(file)
        .apply()
        .cli_context("Failed to initialise logger")?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_log_file_name() {
        assert_eq!(
            log_file_name("20260101_093000"),
            "mediaconv_convert_run_20260101_093000.log"
        );
    }

    #[test]
    fn test_console_level() {
        assert_eq!(console_level(false), LevelFilter::Warn);
        assert_eq!(console_level(true), LevelFilter::Debug);
    }
}
