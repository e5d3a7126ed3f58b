//! Aggregate result of one batch run.

use crate::dispatch::ConversionOutcome;

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// A regular file with no policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    /// Lower-cased extension, empty when the file has none.
    pub extension: String,
}

/// Outcome of a whole run, built up as each file finishes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub total_candidates: usize,
    pub succeeded_count: usize,
    /// One entry per candidate, in dispatch order.
    pub outcomes: Vec<ConversionOutcome>,
    pub skipped: Vec<SkippedFile>,
    /// Directory entries that were not regular files.
    pub ignored_entries: Vec<PathBuf>,
    /// Target paths written more than once in this run (last writer wins).
    pub collisions: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub(crate) fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, outcome: ConversionOutcome) {
        if outcome.succeeded {
            self.succeeded_count += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.succeeded_count
    }

    /// A batch succeeds when at least one file was converted.
    pub fn is_success(&self) -> bool {
        self.succeeded_count > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConversionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded)
    }
}
