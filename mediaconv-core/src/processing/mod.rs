//! Batch orchestration.
//!
//! Ties discovery, the policy table and the dispatcher together into one
//! run over an input directory, and defines the report that run produces.

/// Directory-level runner
pub mod batch;

/// Batch report types
pub mod report;

pub use batch::{BatchRunner, convert_directory};
pub use report::{BatchReport, SkippedFile};
