//! Mirrors events into the `log` facade.
//!
//! Everything is logged under [`EVENT_LOG_TARGET`] so a logger backend can
//! route event lines (e.g. to a log file only) separately from ordinary
//! library diagnostics.

use super::{Event, EventHandler};
use log::{error, info, warn};

/// Log target used for event lines.
pub const EVENT_LOG_TARGET: &str = "mediaconv::events";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventHandler;

impl EventHandler for LogEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::BatchStarted { input_dir, output_dir } => info!(
                target: EVENT_LOG_TARGET,
                "Starting batch conversion from {} to {}",
                input_dir.display(),
                output_dir.display()
            ),
            Event::OutputDirectoryCreated { path } => {
                info!(target: EVENT_LOG_TARGET, "Created output directory {}", path.display())
            }
            Event::EntriesListed { count } => {
                info!(target: EVENT_LOG_TARGET, "Found {} entries in input directory", count)
            }
            Event::FileQueued { source, target } => {
                info!(target: EVENT_LOG_TARGET, "Will convert {} to {}", source.display(), target)
            }
            Event::FileSkipped { source, extension } => warn!(
                target: EVENT_LOG_TARGET,
                "Skipping unsupported file: {} (extension: {:?})",
                source.display(),
                extension
            ),
            Event::EntryIgnored { path } => {
                warn!(target: EVENT_LOG_TARGET, "Skipping non-file item: {}", path.display())
            }
            Event::CandidatesFound { count } => {
                info!(target: EVENT_LOG_TARGET, "Found {} files to convert", count)
            }
            Event::ConversionStarted { source, target_path } => info!(
                target: EVENT_LOG_TARGET,
                "Converting {} to {}",
                source.display(),
                target_path.display()
            ),
            Event::AttemptSucceeded { source, backend } => {
                info!(target: EVENT_LOG_TARGET, "{} converted using {}", source.display(), backend)
            }
            Event::AttemptFailed {
                source,
                backend,
                error,
                remaining,
            } => {
                if *remaining > 0 {
                    warn!(
                        target: EVENT_LOG_TARGET,
                        "{} failed for {}, trying next backend: {}",
                        backend,
                        source.display(),
                        error
                    )
                } else {
                    error!(target: EVENT_LOG_TARGET, "{} failed for {}: {}", backend, source.display(), error)
                }
            }
            Event::ConversionFinished { source, succeeded } => {
                if *succeeded {
                    info!(target: EVENT_LOG_TARGET, "Successfully converted: {}", source.display())
                } else {
                    error!(target: EVENT_LOG_TARGET, "Failed to convert: {}", source.display())
                }
            }
            Event::OutputCollision { target_path, source } => warn!(
                target: EVENT_LOG_TARGET,
                "{} overwrites {} written earlier in this batch",
                source.display(),
                target_path.display()
            ),
            Event::BatchComplete {
                succeeded,
                total,
                elapsed,
            } => info!(
                target: EVENT_LOG_TARGET,
                "Conversion complete: {}/{} files converted successfully in {:.1}s",
                succeeded,
                total,
                elapsed.as_secs_f64()
            ),
        }
    }
}
