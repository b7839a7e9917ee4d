//! bbtrace - basic-block execution profiler core.
//!
//! Counts, for every distinct basic-block address a dynamic binary
//! instrumentation layer discovers in a running target, how many times
//! execution passed through it, and writes a `<hex-addr> <count>` profile
//! when the target exits. The rewriting layer itself is an external
//! collaborator: it reports discoveries, arranges the per-execution
//! increment, and fires the exit notification (see [`ffi`] for the C-side
//! surface).
//!
//! # Example
//!
//! ```
//! use bbtrace::{SessionConfig, TraceSession};
//!
//! let session = TraceSession::new(SessionConfig::new())?;
//! let block = session.register_block(0x401020);
//! block.hit();
//! session.finish()?;
//! # Ok::<(), bbtrace::TraceError>(())
//! ```

mod counter;
mod error;
pub mod ffi;
pub mod metrics;
mod registry;
pub mod report;
mod session;

pub use counter::{BlockHandle, ExecutionCounter};
pub use error::TraceError;
pub use ffi::FfiSessionPtr;
pub use registry::{BlockRecord, BlockRegistry};
pub use report::{ProfileEntry, parse_profile, write_report};
pub use session::{SessionConfig, TraceSession};

pub type Result<T> = std::result::Result<T, TraceError>;
