// mediaconv-core/tests/common/mod.rs
//
// Shared helpers for the integration tests: an event recorder and a
// scripted backend that can be told to succeed or fail.

#![allow(dead_code)]

use mediaconv_core::events::{Event, EventHandler};
use mediaconv_core::{Backend, BackendError, BackendId, TargetFormat};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Collects every event it receives.
#[derive(Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<Event>>,
}

impl RecordingHandler {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl EventHandler for RecordingHandler {
    fn handle(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Backend that writes a small marker file on success, or returns a fixed error.
pub struct MockBackend {
    pub id: BackendId,
    pub failure: Option<BackendError>,
    pub calls: Arc<Mutex<Vec<(BackendId, PathBuf)>>>,
}

impl MockBackend {
    pub fn ok(id: BackendId, calls: &Arc<Mutex<Vec<(BackendId, PathBuf)>>>) -> Box<dyn Backend> {
        Box::new(Self {
            id,
            failure: None,
            calls: calls.clone(),
        })
    }

    pub fn failing(
        id: BackendId,
        error: BackendError,
        calls: &Arc<Mutex<Vec<(BackendId, PathBuf)>>>,
    ) -> Box<dyn Backend> {
        Box::new(Self {
            id,
            failure: Some(error),
            calls: calls.clone(),
        })
    }
}

impl Backend for MockBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    fn convert(&self, source: &Path, target: &Path, format: TargetFormat) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push((self.id, source.to_path_buf()));
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => {
                let marker = format!("{} from {} via {}", format, source.display(), self.id);
                std::fs::write(target, marker).map_err(BackendError::encode)
            }
        }
    }
}

// Helper to create a dummy file with some content
pub fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let file_path = dir.join(filename);
    let mut file = File::create(&file_path).expect("Failed to create dummy file");
    file.write_all(b"dummy content").expect("Failed to write dummy content");
    file_path
}

/// Writes a real 4x4 RGBA PNG.
pub fn create_png(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 180]))
        .save(&path)
        .expect("Failed to write PNG fixture");
    path
}

/// Writes a real 4x4 RGB JPEG.
pub fn create_jpeg(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    image::RgbImage::from_pixel(4, 4, image::Rgb([20, 40, 60]))
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("Failed to write JPEG fixture");
    path
}

/// Names of the files in a directory, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
