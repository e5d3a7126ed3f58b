//! General-purpose still image backend built on the `image` crate.
//!
//! First backend of every image chain. The format is sniffed from the file
//! content, falling back to the extension, so TIFF-structured RAW files
//! (DNG) and misnamed files still decode. Formats the crate has no decoder
//! for (HEIC, most camera RAW files) are reported as unavailable so the
//! dispatcher moves on to the dedicated backend.

use super::{Backend, BackendId, write_image};
use crate::error::BackendError;
use crate::policy::TargetFormat;

use image::{DynamicImage, ImageError, ImageReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct StillImageBackend;

impl Backend for StillImageBackend {
    fn id(&self) -> BackendId {
        BackendId::StillImage
    }

    fn convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
        log::debug!("image: decoding {}", source.display());
        let image = decode(source)?;
        log::debug!(
            "image: decoded {}x{} {:?}, writing {}",
            image.width(),
            image.height(),
            image.color(),
            target.display()
        );
        write_image(&image, target, format)
    }
}

fn decode(source: &Path) -> Result<DynamicImage, BackendError> {
    let reader = ImageReader::open(source)
        .and_then(ImageReader::with_guessed_format)
        .map_err(BackendError::decode)?;
    log::debug!("image: detected format {:?}", reader.format());
    reader.decode().map_err(classify_open_error)
}

fn classify_open_error(err: ImageError) -> BackendError {
    match err {
        ImageError::Unsupported(e) => BackendError::unavailable(e.to_string()),
        other => BackendError::decode(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn png_with_alpha_becomes_rgb_jpeg() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("logo.png");
        let target = dir.path().join("logo.jpg");
        RgbaImage::from_pixel(8, 6, Rgba([255, 0, 0, 0])).save(&source).unwrap();

        StillImageBackend.convert(&source, &target, TargetFormat::Jpeg).unwrap();

        let decoded = image::open(&target).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn jpeg_becomes_png() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        let target = dir.path().join("photo.png");
        RgbImage::from_pixel(5, 5, Rgb([0, 128, 255])).save(&source).unwrap();

        StillImageBackend.convert(&source, &target, TargetFormat::Png).unwrap();

        let format = image::ImageFormat::from_path(&target).unwrap();
        assert_eq!(format, image::ImageFormat::Png);
        assert!(image::open(&target).is_ok());
    }

    #[test]
    fn tiff_bodied_dng_decodes_from_content() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("shot.dng");
        let target = dir.path().join("shot.jpg");
        RgbImage::from_pixel(6, 4, Rgb([90, 60, 30]))
            .save_with_format(&source, image::ImageFormat::Tiff)
            .unwrap();

        StillImageBackend.convert(&source, &target, TargetFormat::Jpeg).unwrap();

        let decoded = image::open(&target).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (6, 4));
    }

    #[test]
    fn misnamed_png_still_decodes() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("actually_png.jpg");
        let target = dir.path().join("actually_png.png");
        RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 4]))
            .save_with_format(&source, image::ImageFormat::Png)
            .unwrap();

        StillImageBackend.convert(&source, &target, TargetFormat::Png).unwrap();

        assert_eq!(image::open(&target).unwrap().color(), image::ColorType::Rgba8);
    }

    #[test]
    fn heic_is_not_decodable_here() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("phone.heic");
        std::fs::write(&source, b"not really heic").unwrap();

        let err = StillImageBackend
            .convert(&source, &dir.path().join("phone.jpg"), TargetFormat::Jpeg)
            .unwrap_err();
        assert_eq!(err.kind(), "BackendUnavailable");
    }

    #[test]
    fn corrupt_png_is_a_decode_failure() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.png");
        std::fs::write(&source, b"\x89PNG\r\n\x1a\ngarbage").unwrap();

        let err = StillImageBackend
            .convert(&source, &dir.path().join("broken.jpg"), TargetFormat::Jpeg)
            .unwrap_err();
        assert_eq!(err.kind(), "DecodeFailed");
    }
}
