// ============================================================================
// mediaconv-core/src/processing/batch.rs
// ============================================================================
//
// BATCH RUNNER: Directory-Level Conversion Orchestration
//
// WORKFLOW:
// 1. Verify the input directory exists (before touching the output side)
// 2. Create the output directory and any missing parents
// 3. List direct entries; ignore anything that is not a regular file
// 4. Classify each file; build a task or record a skip
// 5. Fail with NoCandidates when no task was built
// 6. Resolve each task sequentially and collect the outcomes
//
// Files are processed one at a time, in listing order, including all of
// their fallback attempts. Backend failures never abort the run; only
// directory-level problems do.
//
// AI-ASSISTANT-INFO: Batch runner producing a BatchReport

// ---- Internal crate imports ----
use super::report::{BatchReport, SkippedFile};
use crate::config::CoreConfig;
use crate::discovery;
use crate::dispatch::{ConversionDispatcher, ConversionTask};
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventHandler};
use crate::policy;

// ---- Standard library imports ----
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Converts every supported file of a directory.
pub struct BatchRunner {
    dispatcher: ConversionDispatcher,
}

impl BatchRunner {
    pub fn new(dispatcher: ConversionDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Runner with the production backends configured from `config`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(ConversionDispatcher::with_default_backends(config))
    }

    /// Runs one batch from `input_dir` into `output_dir`.
    ///
    /// # Errors
    ///
    /// * `CoreError::InputDirectoryMissing` - checked before anything is created
    /// * `CoreError::OutputDirectory` - the output directory could not be created
    /// * `CoreError::NoCandidates` - no file had a supported extension
    /// * `CoreError::Io` - the input directory could not be listed
    ///
    /// Individual conversion failures are not errors; they are recorded in
    /// the returned report.
    pub fn run(&self, input_dir: &Path, output_dir: &Path, events: &dyn EventHandler) -> CoreResult<BatchReport> {
        let start = Instant::now();
        events.handle(&Event::BatchStarted {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
        });

        discovery::ensure_input_dir(input_dir)?;
        ensure_output_dir(output_dir, events)?;

        let listing = discovery::list_input_dir(input_dir)?;
        events.handle(&Event::EntriesListed {
            count: listing.total(),
        });

        let mut report = BatchReport::new(input_dir.to_path_buf(), output_dir.to_path_buf());
        let mut tasks = Vec::new();

        for path in listing.others {
            events.handle(&Event::EntryIgnored { path: path.clone() });
            report.ignored_entries.push(path);
        }

        for path in listing.files {
            match ConversionTask::for_source(&path, output_dir) {
                Some(task) => {
                    events.handle(&Event::FileQueued {
                        source: path,
                        target: task.target_format(),
                    });
                    tasks.push(task);
                }
                None => {
                    let extension = policy::normalized_extension(&path);
                    events.handle(&Event::FileSkipped {
                        source: path.clone(),
                        extension: extension.clone(),
                    });
                    report.skipped.push(SkippedFile { path, extension });
                }
            }
        }

        if tasks.is_empty() {
            log::error!("No files to convert found in {}", input_dir.display());
            return Err(CoreError::NoCandidates {
                skipped: report.skipped.len(),
            });
        }

        report.total_candidates = tasks.len();
        events.handle(&Event::CandidatesFound { count: tasks.len() });

        // Target path -> source that last claimed it.
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for task in tasks {
            let target = task.target_path().to_path_buf();
            let source = task.source_path().to_path_buf();
            if let Some(previous) = claimed.insert(target.clone(), source.clone()) {
                log::debug!("{} was already claimed by {}", target.display(), previous.display());
                events.handle(&Event::OutputCollision {
                    target_path: target.clone(),
                    source,
                });
                if !report.collisions.contains(&target) {
                    report.collisions.push(target);
                }
            }

            let outcome = self.dispatcher.resolve(task, events);
            report.record(outcome);
        }

        report.elapsed = start.elapsed();
        events.handle(&Event::BatchComplete {
            succeeded: report.succeeded_count,
            total: report.total_candidates,
            elapsed: report.elapsed,
        });

        Ok(report)
    }
}

/// Creates `output_dir` and its parents. An existing directory is fine.
fn ensure_output_dir(output_dir: &Path, events: &dyn EventHandler) -> CoreResult<()> {
    if output_dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(output_dir).map_err(|source| CoreError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    })?;
    events.handle(&Event::OutputDirectoryCreated {
        path: output_dir.to_path_buf(),
    });
    Ok(())
}

/// Converts the directory described by `config` with the production backends.
pub fn convert_directory(config: &CoreConfig, events: &dyn EventHandler) -> CoreResult<BatchReport> {
    config.validate()?;
    BatchRunner::from_config(config).run(&config.input_dir, &config.output_dir, events)
}
