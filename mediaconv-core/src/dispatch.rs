// ============================================================================
// mediaconv-core/src/dispatch.rs
// ============================================================================
//
// CONVERSION DISPATCH: Per-File Fallback Over Ordered Backend Chains
//
// A ConversionTask is resolved by walking the fallback chain of its source
// category. Each backend attempt produces a tagged result that is appended
// to the attempts log; the walk stops at the first success or when the
// chain is exhausted.
//
// FALLBACK CHAINS:
// - still image (JPEG->PNG, PNG->JPEG): image
// - HEIC/HEIF:                          image -> libheif
// - camera RAW:                         image -> imagepipe
// - MP4 video:                          ffmpeg
//
// AI-ASSISTANT-INFO: Fallback dispatcher and per-file outcome types

// ---- Internal crate imports ----
use crate::backends::{Backend, BackendId};
use crate::config::CoreConfig;
use crate::error::BackendError;
use crate::events::{Event, EventHandler};
use crate::policy::{self, SourceCategory, TargetFormat};

// ---- External crate imports ----
use serde::Serialize;

// ---- Standard library imports ----
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// ============================================================================
// TASK AND OUTCOME TYPES
// ============================================================================

/// One file to convert. Only constructible for extensions with a policy rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionTask {
    source_path: PathBuf,
    target_path: PathBuf,
    target_format: TargetFormat,
    source_category: SourceCategory,
}

impl ConversionTask {
    /// Builds the task for `source`, placing the output in `output_dir`.
    ///
    /// Returns `None` when the extension has no policy rule. The output name
    /// is the source file stem plus the target's canonical extension.
    pub fn for_source(source: &Path, output_dir: &Path) -> Option<Self> {
        let classification = policy::classify(source);
        let target_format = classification.target?;
        let stem = source.file_stem()?;

        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(target_format.extension());

        Some(Self {
            source_path: source.to_path_buf(),
            target_path: output_dir.join(file_name),
            target_format,
            source_category: classification.category,
        })
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }

    pub fn source_category(&self) -> SourceCategory {
        self.source_category
    }
}

/// Result of one backend attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptResult {
    Success,
    Failure { error: BackendError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendAttempt {
    pub backend: BackendId,
    pub result: AttemptResult,
}

impl BackendAttempt {
    pub fn succeeded(&self) -> bool {
        matches!(self.result, AttemptResult::Success)
    }

    pub fn error(&self) -> Option<&BackendError> {
        match &self.result {
            AttemptResult::Success => None,
            AttemptResult::Failure { error } => Some(error),
        }
    }
}

/// Final result for one task.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub task: ConversionTask,
    pub succeeded: bool,
    pub attempts: Vec<BackendAttempt>,
    pub elapsed: Duration,
}

impl ConversionOutcome {
    /// Backend that produced the output, if any.
    pub fn successful_backend(&self) -> Option<BackendId> {
        self.attempts.iter().find(|a| a.succeeded()).map(|a| a.backend)
    }

    /// Error of the final attempt when the task failed.
    pub fn last_error(&self) -> Option<&BackendError> {
        if self.succeeded {
            return None;
        }
        self.attempts.last().and_then(BackendAttempt::error)
    }
}

// ============================================================================
// FALLBACK CHAINS
// ============================================================================

/// Ordered backends tried for a category. Empty for `Unsupported`.
pub fn fallback_chain(category: SourceCategory) -> &'static [BackendId] {
    match category {
        SourceCategory::StillImageStandard => &[BackendId::StillImage],
        SourceCategory::HeicHeif => &[BackendId::StillImage, BackendId::Heif],
        SourceCategory::RawCamera => &[BackendId::StillImage, BackendId::RawImage],
        SourceCategory::VideoContainer => &[BackendId::Ffmpeg],
        SourceCategory::Unsupported => &[],
    }
}

// ============================================================================
// DISPATCHER
// ============================================================================

/// Resolves conversion tasks against a set of registered backends.
pub struct ConversionDispatcher {
    backends: Vec<Box<dyn Backend>>,
}

impl ConversionDispatcher {
    pub fn new(backends: Vec<Box<dyn Backend>>) -> Self {
        Self { backends }
    }

    /// Dispatcher with the production backends.
    pub fn with_default_backends(config: &CoreConfig) -> Self {
        Self::new(crate::backends::default_backends(config))
    }

    fn backend(&self, id: BackendId) -> Option<&dyn Backend> {
        self.backends.iter().find(|b| b.id() == id).map(|b| b.as_ref())
    }

    /// Runs the task's fallback chain until one backend succeeds.
    ///
    /// Backend errors never escape: each one is recorded in the attempts log
    /// and the next backend is tried. A chain entry with no registered
    /// backend counts as an unavailable attempt.
    pub fn resolve(&self, task: ConversionTask, events: &dyn EventHandler) -> ConversionOutcome {
        let start = Instant::now();
        let chain = fallback_chain(task.source_category);
        let mut attempts = Vec::with_capacity(chain.len());

        events.handle(&Event::ConversionStarted {
            source: task.source_path.clone(),
            target_path: task.target_path.clone(),
        });

        for (index, &id) in chain.iter().enumerate() {
            let result = match self.backend(id) {
                Some(backend) => backend.convert(&task.source_path, &task.target_path, task.target_format),
                None => Err(BackendError::unavailable(format!("no {id} backend registered"))),
            };

            match result {
                Ok(()) => {
                    events.handle(&Event::AttemptSucceeded {
                        source: task.source_path.clone(),
                        backend: id,
                    });
                    attempts.push(BackendAttempt {
                        backend: id,
                        result: AttemptResult::Success,
                    });
                    break;
                }
                Err(error) => {
                    log::debug!("{} attempt {} of {} failed: {}", id, index + 1, chain.len(), error);
                    events.handle(&Event::AttemptFailed {
                        source: task.source_path.clone(),
                        backend: id,
                        error: error.clone(),
                        remaining: chain.len() - index - 1,
                    });
                    attempts.push(BackendAttempt {
                        backend: id,
                        result: AttemptResult::Failure { error },
                    });
                }
            }
        }

        let succeeded = attempts.last().is_some_and(BackendAttempt::succeeded);
        events.handle(&Event::ConversionFinished {
            source: task.source_path.clone(),
            succeeded,
        });

        ConversionOutcome {
            task,
            succeeded,
            attempts,
            elapsed: start.elapsed(),
        }
    }
}
