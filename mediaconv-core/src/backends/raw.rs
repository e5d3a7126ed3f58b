//! Camera RAW backend built on `imagepipe`.
//!
//! imagepipe decodes the sensor data through rawloader and runs a default
//! development pipeline, producing an 8-bit sRGB buffer that is then
//! written with the shared still-image encoder.

use super::{Backend, BackendId, write_image};
use crate::error::BackendError;
use crate::policy::TargetFormat;

use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Width and height limits passed to imagepipe; zero keeps full resolution.
const NO_SIZE_LIMIT: usize = 0;

#[derive(Debug, Clone, Copy, Default)]
pub struct RawImageBackend;

impl Backend for RawImageBackend {
    fn id(&self) -> BackendId {
        BackendId::RawImage
    }

    fn convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
        log::debug!("imagepipe: developing {}", source.display());
        let developed = imagepipe::simple_decode_8bit(source, NO_SIZE_LIMIT, NO_SIZE_LIMIT)
            .map_err(BackendError::decode)?;

        let (width, height) = (developed.width, developed.height);
        let buffer = RgbImage::from_raw(width as u32, height as u32, developed.data).ok_or_else(|| {
            BackendError::decode(format!(
                "developed buffer does not match its {width}x{height} dimensions"
            ))
        })?;

        write_image(&DynamicImage::ImageRgb8(buffer), target, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn garbage_input_is_a_decode_failure() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("shot.cr2");
        std::fs::write(&source, b"definitely not a canon raw file").unwrap();

        let err = RawImageBackend
            .convert(&source, &dir.path().join("shot.jpg"), TargetFormat::Jpeg)
            .unwrap_err();
        assert_eq!(err.kind(), "DecodeFailed");
        assert!(!dir.path().join("shot.jpg").exists());
    }
}
