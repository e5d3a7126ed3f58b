// ============================================================================
// mediaconv-core/src/backends/mod.rs
// ============================================================================
//
// BACKENDS: Uniform Adapters Around Decode/Encode Capabilities
//
// Each backend wraps one external capability (an image codec library, a
// RAW decoder, the ffmpeg executable) behind the `Backend` trait: given a
// source path, a target path and a target format it either writes the
// output file or returns a classified `BackendError`.
//
// KEY COMPONENTS:
// - BackendId: stable identifiers used by the fallback chains
// - Backend: the call contract every adapter implements
// - Shared encode helpers used by all still-image backends
// - default_backends: the production backend set
//
// AI-ASSISTANT-INFO: Backend trait and shared encode helpers

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::error::BackendError;
use crate::policy::{JPEG_QUALITY, TargetFormat};

// ---- External crate imports ----
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;

// ---- Standard library imports ----
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Audio extraction through the ffmpeg executable
pub mod ffmpeg;

/// Direct HEIF decoding through libheif
pub mod heif;

/// General-purpose still image codec (the `image` crate)
pub mod still_image;

/// Camera RAW decoding through imagepipe
pub mod raw;

pub use ffmpeg::FfmpegAudioBackend;
pub use heif::HeifBackend;
pub use raw::RawImageBackend;
pub use still_image::StillImageBackend;

// ============================================================================
// BACKEND CONTRACT
// ============================================================================

/// Identifier of a backend within a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendId {
    /// General-purpose still image library
    StillImage,
    /// Direct HEIF library decode plus re-encode
    Heif,
    /// Generic multi-format image I/O used for camera RAW files
    RawImage,
    /// External ffmpeg process for audio extraction
    Ffmpeg,
}

impl BackendId {
    pub fn name(self) -> &'static str {
        match self {
            Self::StillImage => "image",
            Self::Heif => "libheif",
            Self::RawImage => "imagepipe",
            Self::Ffmpeg => "ffmpeg",
        }
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decode/encode capability usable for one conversion step.
pub trait Backend {
    /// Identifier this backend answers to in fallback chains.
    fn id(&self) -> BackendId;

    /// Produces `target` from `source` in the requested format.
    fn convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError>;
}

/// Builds the production backend set for the given configuration.
pub fn default_backends(config: &CoreConfig) -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(StillImageBackend),
        Box::new(HeifBackend),
        Box::new(RawImageBackend),
        Box::new(FfmpegAudioBackend::new(config.ffmpeg_path.clone())),
    ]
}

// ============================================================================
// SHARED ENCODE HELPERS
// ============================================================================

const NO_AUDIO_OUTPUT: &str = "still image backends cannot produce audio";

/// Writes a decoded image in the requested still-image format.
///
/// JPEG output is converted to RGB first; alpha and palette modes cannot be
/// stored in a JPEG. The buffered writer is flushed explicitly so a failed
/// final write is reported, and a partially written target is removed.
pub(crate) fn write_image(image: &DynamicImage, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
    if format == TargetFormat::Mp3 {
        return Err(BackendError::unavailable(NO_AUDIO_OUTPUT));
    }

    let result = encode_to_file(image, target, format);
    if let Err(e) = &result {
        log::debug!("Encoding {} failed: {}", target.display(), e);
        remove_partial_output(target);
    }
    result
}

fn encode_to_file(image: &DynamicImage, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
    let file = File::create(target).map_err(BackendError::encode)?;
    let mut writer = BufWriter::new(file);

    match format {
        TargetFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
            DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(BackendError::encode)?;
        }
        TargetFormat::Png => image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(BackendError::encode)?,
        TargetFormat::Mp3 => return Err(BackendError::unavailable(NO_AUDIO_OUTPUT)),
    }

    writer
        .into_inner()
        .map_err(|e| BackendError::encode(e.into_error()))?;
    Ok(())
}

/// Removes whatever a failed conversion left at `target`.
///
/// Only regular files are removed; a device or directory at the target path
/// is left alone.
pub(crate) fn remove_partial_output(target: &Path) {
    match std::fs::symlink_metadata(target) {
        Ok(meta) if meta.is_file() => match std::fs::remove_file(target) {
            Ok(()) => log::debug!("Removed partial output {}", target.display()),
            Err(e) => log::warn!("Failed to remove partial output {}: {}", target.display(), e),
        },
        _ => {}
    }
}
