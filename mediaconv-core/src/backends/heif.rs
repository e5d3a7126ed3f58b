//! Direct HEIF backend built on `libheif-rs`.
//!
//! Compiled only with the `heif` feature, since libheif is a system library.
//! Without the feature the backend stays registered and reports itself as
//! unavailable, which keeps the HEIC fallback chain the same length in every
//! build.

use super::{Backend, BackendId};
use crate::error::BackendError;
use crate::policy::TargetFormat;

use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeifBackend;

impl Backend for HeifBackend {
    fn id(&self) -> BackendId {
        BackendId::Heif
    }

    fn convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
        imp::convert(source, target, format)
    }
}

#[cfg(feature = "heif")]
mod imp {
    use super::super::write_image;
    use crate::error::BackendError;
    use crate::policy::TargetFormat;

    use image::{DynamicImage, RgbImage};
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
    use std::path::Path;

    pub(super) fn convert(source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
        let path = source
            .to_str()
            .ok_or_else(|| BackendError::decode("source path is not valid UTF-8"))?;

        log::debug!("libheif: reading {}", source.display());
        let lib_heif = LibHeif::new();
        let context = HeifContext::read_from_file(path).map_err(BackendError::decode)?;
        let handle = context.primary_image_handle().map_err(BackendError::decode)?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(BackendError::decode)?;

        let planes = decoded.planes();
        let plane = planes
            .interleaved
            .ok_or_else(|| BackendError::decode("decoded image has no interleaved RGB plane"))?;

        let (width, height) = (plane.width, plane.height);
        let row_len = width as usize * 3;
        let mut pixels = Vec::with_capacity(row_len * height as usize);
        for row in plane.data.chunks(plane.stride).take(height as usize) {
            pixels.extend_from_slice(&row[..row_len]);
        }

        let buffer = RgbImage::from_raw(width, height, pixels)
            .ok_or_else(|| BackendError::decode("decoded plane is shorter than its dimensions"))?;
        write_image(&DynamicImage::ImageRgb8(buffer), target, format)
    }
}

#[cfg(not(feature = "heif"))]
mod imp {
    use crate::error::BackendError;
    use crate::policy::TargetFormat;
    use std::path::Path;

    pub(super) fn convert(_source: &Path, _target: &Path, _format: TargetFormat) -> Result<(), BackendError> {
        Err(BackendError::unavailable(
            "built without the `heif` feature (libheif support)",
        ))
    }
}
