//! Command implementations for the CLI.

/// Probes the input, plans one work item per chapter and runs the batch.
pub mod split;
