//! Profiler error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Profiler error type.
///
/// All variants are terminal: partial instrumentation state would produce a
/// silently incomplete profile, so there are no retry paths.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to open output file {}: {source}", path.display())]
    OutputOpen { path: PathBuf, source: io::Error },

    #[error("failed to write profile: {0}")]
    Report(#[from] io::Error),
}
