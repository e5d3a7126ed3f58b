// ============================================================================
// mediaconv-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Run-Level and Per-Attempt Error Types
//
// Two error families exist. `CoreError` aborts a whole run (missing input
// directory, output directory creation failure, nothing to convert).
// `BackendError` describes a single failed backend attempt; it never aborts
// anything and only ends up in the attempts log of a conversion outcome.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Input directory does not exist: {0}")]
    InputDirectoryMissing(PathBuf),

    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No files to convert found ({skipped} unsupported file(s) skipped)")]
    NoCandidates { skipped: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for run-level operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Classified failure of one backend attempt.
///
/// The dispatcher treats every variant the same way (advance to the next
/// backend in the chain); the distinction exists for diagnosis.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendError {
    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("decode failed: {reason}")]
    DecodeFailed { reason: String },

    #[error("encode failed: {reason}")]
    EncodeFailed { reason: String },

    #[error("external process exited with {}: {diagnostics}", exit_code_display(.exit_code))]
    ExternalProcess {
        exit_code: Option<i32>,
        diagnostics: String,
    },
}

impl BackendError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    pub fn decode(reason: impl ToString) -> Self {
        Self::DecodeFailed { reason: reason.to_string() }
    }

    pub fn encode(reason: impl ToString) -> Self {
        Self::EncodeFailed { reason: reason.to_string() }
    }

    /// Short label used in terminal output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "BackendUnavailable",
            Self::DecodeFailed { .. } => "DecodeFailed",
            Self::EncodeFailed { .. } => "EncodeFailed",
            Self::ExternalProcess { .. } => "ExternalProcessError",
        }
    }
}

fn exit_code_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_process_message_includes_code_and_diagnostics() {
        let err = BackendError::ExternalProcess {
            exit_code: Some(1),
            diagnostics: "Invalid data found when processing input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "external process exited with exit code 1: Invalid data found when processing input"
        );
        assert_eq!(err.kind(), "ExternalProcessError");
    }

    #[test]
    fn signal_termination_has_no_exit_code() {
        let err = BackendError::ExternalProcess {
            exit_code: None,
            diagnostics: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn backend_error_serializes_with_kind_tag() {
        let value = serde_json::to_value(BackendError::decode("bad header")).unwrap();
        assert_eq!(value["kind"], "decode_failed");
        assert_eq!(value["reason"], "bad header");
    }
}
