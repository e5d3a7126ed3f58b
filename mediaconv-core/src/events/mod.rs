//! Events emitted during a conversion run and the sinks that consume them.
//!
//! The runner and dispatcher never print. Every user-visible message is an
//! [`Event`] handed to the [`EventHandler`] the caller passed in.

use crate::backends::BackendId;
use crate::error::BackendError;
use crate::policy::TargetFormat;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod json_handler;
pub mod log_handler;

pub use json_handler::JsonEventHandler;
pub use log_handler::{EVENT_LOG_TARGET, LogEventHandler};

#[derive(Debug, Clone)]
pub enum Event {
    BatchStarted {
        input_dir: PathBuf,
        output_dir: PathBuf,
    },
    OutputDirectoryCreated {
        path: PathBuf,
    },
    EntriesListed {
        count: usize,
    },

    // Classification
    FileQueued {
        source: PathBuf,
        target: TargetFormat,
    },
    FileSkipped {
        source: PathBuf,
        extension: String,
    },
    EntryIgnored {
        path: PathBuf,
    },
    CandidatesFound {
        count: usize,
    },

    // Per-file conversion
    ConversionStarted {
        source: PathBuf,
        target_path: PathBuf,
    },
    AttemptSucceeded {
        source: PathBuf,
        backend: BackendId,
    },
    AttemptFailed {
        source: PathBuf,
        backend: BackendId,
        error: BackendError,
        /// Backends still left in the chain after this one.
        remaining: usize,
    },
    ConversionFinished {
        source: PathBuf,
        succeeded: bool,
    },
    OutputCollision {
        target_path: PathBuf,
        source: PathBuf,
    },

    BatchComplete {
        succeeded: usize,
        total: usize,
        elapsed: Duration,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

/// Handler that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventHandler;

impl EventHandler for NullEventHandler {
    fn handle(&self, _event: &Event) {}
}

/// Fans each event out to every registered handler, in registration order.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        self.handle(&event);
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for EventDispatcher {
    fn handle(&self, event: &Event) {
        for handler in &self.handlers {
            handler.handle(event);
        }
    }
}
