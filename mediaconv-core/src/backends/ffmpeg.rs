// ============================================================================
// mediaconv-core/src/backends/ffmpeg.rs
// ============================================================================
//
// FFMPEG BACKEND: Audio Extraction Through the ffmpeg Executable
//
// Runs `ffmpeg -y -i <src> -vn -acodec libmp3lame <dst>` and waits for it.
// Exit code 0 is success. Any other exit status is an ExternalProcess error
// carrying the captured stderr verbatim, and whatever partial file ffmpeg
// left at the destination is removed. A missing executable is reported as
// an unavailable backend.
//
// No timeout is applied; a hung ffmpeg blocks the batch.
//
// AI-ASSISTANT-INFO: ffmpeg process invocation for MP4 to MP3 extraction

// ---- Internal crate imports ----
use super::{Backend, BackendId, remove_partial_output};
use crate::error::BackendError;
use crate::policy::{AUDIO_CODEC, TargetFormat};

// ---- Standard library imports ----
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Backend that shells out to ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegAudioBackend {
    program: PathBuf,
}

impl FfmpegAudioBackend {
    /// Uses `program` when given, otherwise the ffmpeg binary located by
    /// ffmpeg-sidecar (its download directory next to the executable, or
    /// `ffmpeg` on the PATH).
    pub fn new(program: Option<PathBuf>) -> Self {
        Self {
            program: program.unwrap_or_else(ffmpeg_sidecar::paths::ffmpeg_path),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument list passed to ffmpeg for one extraction.
    pub fn build_args(source: &Path, target: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            source.as_os_str().to_owned(),
            "-vn".into(),
            "-acodec".into(),
            AUDIO_CODEC.into(),
            target.as_os_str().to_owned(),
        ]
    }
}

impl Default for FfmpegAudioBackend {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Backend for FfmpegAudioBackend {
    fn id(&self) -> BackendId {
        BackendId::Ffmpeg
    }

    fn convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
        if format != TargetFormat::Mp3 {
            return Err(BackendError::unavailable(format!(
                "ffmpeg backend only extracts MP3 audio, not {format}"
            )));
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(Self::build_args(source, target))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        log::debug!("Running: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                log::warn!("ffmpeg not found at '{}'", self.program.display());
                BackendError::unavailable(format!("'{}' not found", self.program.display()))
            } else {
                log::error!("Failed to start '{}': {}", self.program.display(), e);
                BackendError::ExternalProcess {
                    exit_code: None,
                    diagnostics: format!("failed to start: {e}"),
                }
            }
        })?;

        if output.status.success() {
            return Ok(());
        }

        let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        log::error!(
            "ffmpeg exited with {:?} for {}",
            output.status.code(),
            source.display()
        );
        remove_partial_output(target);
        Err(BackendError::ExternalProcess {
            exit_code: output.status.code(),
            diagnostics,
        })
    }
}
