// ============================================================================
// mediaconv-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Both directories are required; build()
// reports a missing one as a configuration error.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;
use crate::error::{CoreError, CoreResult};

/// Builder for creating CoreConfig instances.
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    // Required fields
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,

    // Optional fields
    ffmpeg_path: Option<PathBuf>,
}

impl CoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory whose files are converted.
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    /// Sets the directory converted files are written to.
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Sets an explicit ffmpeg executable.
    pub fn ffmpeg_path(mut self, ffmpeg_path: PathBuf) -> Self {
        self.ffmpeg_path = Some(ffmpeg_path);
        self
    }

    /// Like [`Self::ffmpeg_path`], but leaves the default lookup in place for `None`.
    pub fn maybe_ffmpeg_path(mut self, ffmpeg_path: Option<PathBuf>) -> Self {
        self.ffmpeg_path = ffmpeg_path;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> CoreResult<CoreConfig> {
        let input_dir = self
            .input_dir
            .ok_or_else(|| CoreError::Config("input directory is required".to_string()))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| CoreError::Config("output directory is required".to_string()))?;

        let config = CoreConfig {
            input_dir,
            output_dir,
            ffmpeg_path: self.ffmpeg_path,
        };
        config.validate()?;
        Ok(config)
    }
}
