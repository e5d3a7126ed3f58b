//! Command implementations for the CLI.

/// Module containing the implementation of the `convert` command.
/// This command converts every supported file of an input directory.
pub mod convert;
