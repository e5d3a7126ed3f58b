//! Core library for converting a directory of media files into normalized
//! target formats.
//!
//! Every file is classified by extension through a single policy table
//! (JPEG→PNG, PNG/HEIC/RAW→JPEG, MP4→MP3). Each candidate is then resolved
//! by trying the backends of its fallback chain in order until one of them
//! produces the output. Outcomes are aggregated into a [`BatchReport`].
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mediaconv_core::config::CoreConfigBuilder;
//! use mediaconv_core::events::LogEventHandler;
//! use mediaconv_core::convert_directory;
//! use std::path::PathBuf;
//!
//! let config = CoreConfigBuilder::new()
//!     .input_dir(PathBuf::from("/path/to/uploads"))
//!     .output_dir(PathBuf::from("/path/to/converted"))
//!     .build()
//!     .unwrap();
//!
//! let report = convert_directory(&config, &LogEventHandler).unwrap();
//! println!(
//!     "{}/{} files converted",
//!     report.succeeded_count, report.total_candidates
//! );
//! ```

pub mod backends;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod policy;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use backends::{Backend, BackendId};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use dispatch::{
    AttemptResult, BackendAttempt, ConversionDispatcher, ConversionOutcome, ConversionTask,
};
pub use error::{BackendError, CoreError, CoreResult};
pub use events::{Event, EventHandler};
pub use policy::{SourceCategory, TargetFormat};
pub use processing::{BatchReport, BatchRunner, SkippedFile, convert_directory};
pub use utils::{format_bytes, format_duration};
