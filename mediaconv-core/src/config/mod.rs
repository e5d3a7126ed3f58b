//! Configuration for a conversion run.
//!
//! The conversion policy itself (targets, JPEG quality, audio codec) is fixed
//! in [`crate::policy`]; the configuration only carries the run's paths and
//! where to find external tools.

mod builder;

use crate::error::{CoreError, CoreResult};
use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

/// Environment variable consulted by the CLI for the ffmpeg executable.
pub const FFMPEG_PATH_ENV: &str = "MEDIACONV_FFMPEG";

/// Main configuration structure for the mediaconv-core library.
///
/// # Examples
///
/// ```rust
/// use mediaconv_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/uploads"))
///     .output_dir(PathBuf::from("/path/to/converted"))
///     .ffmpeg_path(PathBuf::from("/usr/local/bin/ffmpeg"))
///     .build()
///     .unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory whose direct entries are converted
    pub input_dir: PathBuf,

    /// Directory receiving converted files (created if missing)
    pub output_dir: PathBuf,

    /// Explicit ffmpeg executable; `None` lets ffmpeg-sidecar locate it
    pub ffmpeg_path: Option<PathBuf>,
}

impl CoreConfig {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ffmpeg_path: None,
        }
    }

    /// Rejects configurations that cannot describe a run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("input directory must not be empty".to_string()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(CoreError::Config("output directory must not be empty".to_string()));
        }
        if let Some(path) = &self.ffmpeg_path {
            if path.as_os_str().is_empty() {
                return Err(CoreError::Config("ffmpeg path must not be empty".to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_ffmpeg_override() {
        let config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
        assert!(config.ffmpeg_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_paths_are_rejected() {
        let config = CoreConfig::new(PathBuf::new(), PathBuf::from("out"));
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = CoreConfig::new(PathBuf::from("in"), PathBuf::new());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let mut config = CoreConfig::new(PathBuf::from("in"), PathBuf::from("out"));
        config.ffmpeg_path = Some(PathBuf::new());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
