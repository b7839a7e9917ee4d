//! Per-block execution counters and the handles that reference them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::registry::BlockRecord;

/// Execution counter for a single basic block.
///
/// `repr(transparent)` over an `AtomicU64`, so the instrumentation substrate
/// sees a plain 8-byte cell and the inserted analysis call can increment it
/// through a raw pointer.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct ExecutionCounter(AtomicU64);

impl ExecutionCounter {
    /// Create a zeroed counter.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Record one execution of the block.
    ///
    /// Relaxed ordering: only the total matters, and emission is ordered
    /// after the last increment by the substrate's exit notification.
    #[inline]
    pub fn bump(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Stable reference to one registered block's counter.
///
/// Cloneable and cheap to pass to target threads. The registry keeps its own
/// reference to the record, so the counter cell outlives every handle and
/// every raw pointer handed to the substrate.
#[derive(Clone, Debug)]
pub struct BlockHandle {
    record: Arc<BlockRecord>,
}

impl BlockHandle {
    pub(crate) fn new(record: Arc<BlockRecord>) -> Self {
        Self { record }
    }

    /// Record one execution. The hot path: a single atomic add, no locks,
    /// no registry access.
    #[inline]
    pub fn hit(&self) {
        self.record.count.bump();
    }

    /// Block entry address.
    #[must_use]
    pub fn addr(&self) -> u64 {
        self.record.addr
    }

    /// Executions recorded so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.record.count.get()
    }

    /// Raw pointer to the counter cell, for the substrate's inserted
    /// analysis call. Valid for the lifetime of the owning registry; the
    /// record never moves because it is individually heap-allocated.
    #[must_use]
    pub fn as_counter_ptr(&self) -> *const ExecutionCounter {
        std::ptr::from_ref(&self.record.count)
    }
}
