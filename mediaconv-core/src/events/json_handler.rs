//! JSON-lines event handler
//!
//! Writes one JSON object per event for consumption by other tools. Each
//! object carries a `type` field and a unix `timestamp`.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventHandler {
    /// Create a handler that writes to stdout
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Create a handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }

    /// Converts an event to its JSON representation, without timestamp.
    pub fn to_json(event: &Event) -> serde_json::Value {
        match event {
            Event::BatchStarted { input_dir, output_dir } => json!({
                "type": "batch_started",
                "input_dir": input_dir.display().to_string(),
                "output_dir": output_dir.display().to_string(),
            }),
            Event::OutputDirectoryCreated { path } => json!({
                "type": "output_directory_created",
                "path": path.display().to_string(),
            }),
            Event::EntriesListed { count } => json!({
                "type": "entries_listed",
                "count": count,
            }),
            Event::FileQueued { source, target } => json!({
                "type": "file_queued",
                "source": source.display().to_string(),
                "target_format": target,
            }),
            Event::FileSkipped { source, extension } => json!({
                "type": "file_skipped",
                "source": source.display().to_string(),
                "extension": extension,
            }),
            Event::EntryIgnored { path } => json!({
                "type": "entry_ignored",
                "path": path.display().to_string(),
            }),
            Event::CandidatesFound { count } => json!({
                "type": "candidates_found",
                "count": count,
            }),
            Event::ConversionStarted { source, target_path } => json!({
                "type": "conversion_started",
                "source": source.display().to_string(),
                "target_path": target_path.display().to_string(),
            }),
            Event::AttemptSucceeded { source, backend } => json!({
                "type": "attempt_succeeded",
                "source": source.display().to_string(),
                "backend": backend,
            }),
            Event::AttemptFailed {
                source,
                backend,
                error,
                remaining,
            } => json!({
                "type": "attempt_failed",
                "source": source.display().to_string(),
                "backend": backend,
                "error": error,
                "remaining": remaining,
            }),
            Event::ConversionFinished { source, succeeded } => json!({
                "type": "conversion_finished",
                "source": source.display().to_string(),
                "succeeded": succeeded,
            }),
            Event::OutputCollision { target_path, source } => json!({
                "type": "output_collision",
                "target_path": target_path.display().to_string(),
                "source": source.display().to_string(),
            }),
            Event::BatchComplete {
                succeeded,
                total,
                elapsed,
            } => json!({
                "type": "batch_complete",
                "succeeded": succeeded,
                "total": total,
                "elapsed_seconds": elapsed.as_secs_f64(),
            }),
        }
    }
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &Event) {
        let mut value = Self::to_json(event);
        value["timestamp"] = json!(Self::get_timestamp());
        self.write_json(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::BackendId;
    use crate::error::BackendError;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Writer that appends into a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_event() {
        let buffer = SharedBuffer::default();
        let handler = JsonEventHandler::with_writer(Box::new(buffer.clone()));

        handler.handle(&Event::EntriesListed { count: 2 });
        handler.handle(&Event::AttemptFailed {
            source: PathBuf::from("in/a.heic"),
            backend: BackendId::StillImage,
            error: BackendError::unavailable("no decoder"),
            remaining: 1,
        });

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "entries_listed");
        assert_eq!(lines[0]["count"], 2);
        assert!(lines[0]["timestamp"].is_u64());
        assert_eq!(lines[1]["type"], "attempt_failed");
        assert_eq!(lines[1]["backend"], "still_image");
        assert_eq!(lines[1]["error"]["kind"], "unavailable");
        assert_eq!(lines[1]["remaining"], 1);
    }
}
