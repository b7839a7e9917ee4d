//! Tracing session: one per target-program run.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use metrics::counter;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::counter::BlockHandle;
use crate::error::TraceError;
use crate::registry::BlockRegistry;
use crate::report;

/// Session configuration.
///
/// The single knob is the output path; without one the report goes to the
/// diagnostic stream (stderr).
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Report destination. `None` means stderr.
    pub output: Option<PathBuf>,
}

impl SessionConfig {
    /// Default configuration: report to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the report to `path` instead of stderr.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

enum ReportSink {
    Stderr,
    File(BufWriter<File>),
}

/// One profiling run over one target process.
///
/// Constructed before the target starts executing, torn down by
/// [`TraceSession::finish`] from the substrate's exit notification. The
/// output file is opened eagerly so a bad path fails before any
/// instrumentation happens.
pub struct TraceSession {
    registry: BlockRegistry,
    sink: Mutex<ReportSink>,
}

impl TraceSession {
    /// Create a session, opening the configured output sink.
    ///
    /// # Errors
    /// Returns [`TraceError::OutputOpen`] if the output path cannot be
    /// created. No partial file is left behind on failure.
    pub fn new(config: SessionConfig) -> Result<Self, TraceError> {
        let sink = match config.output {
            Some(path) => {
                let file = File::create(&path).map_err(|source| TraceError::OutputOpen {
                    path: path.clone(),
                    source,
                })?;
                debug!(path = %path.display(), "profile output file opened");
                ReportSink::File(BufWriter::new(file))
            }
            None => ReportSink::Stderr,
        };
        Ok(Self {
            registry: BlockRegistry::new(),
            sink: Mutex::new(sink),
        })
    }

    /// Discovery hook: the rewriting layer reports a new basic block at
    /// `addr`. Returns the handle whose counter the block's inserted
    /// analysis call must bump on every execution.
    pub fn register_block(&self, addr: u64) -> BlockHandle {
        self.registry.register(addr)
    }

    /// The discovered-block table.
    #[must_use]
    pub const fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Exit hook: emit the profile to the configured sink.
    ///
    /// The substrate guarantees no further increments are delivered once its
    /// exit notification fires, so the counts written here are final. The
    /// registry is left intact.
    ///
    /// # Errors
    /// Returns [`TraceError::Report`] if writing the profile fails.
    pub fn finish(&self) -> Result<(), TraceError> {
        let records = self.registry.snapshot();
        {
            let mut sink = self.sink.lock();
            match &mut *sink {
                ReportSink::Stderr => {
                    let stderr = io::stderr();
                    report::write_report(&records, &mut stderr.lock())?;
                }
                ReportSink::File(w) => report::write_report(&records, w)?,
            }
        }
        counter!("bbtrace_blocks_reported_total").increment(records.len() as u64);
        info!(blocks = records.len(), "execution profile written");
        Ok(())
    }
}
