//! Discovered-block table.

use std::sync::Arc;

use metrics::counter;
use parking_lot::Mutex;

use crate::counter::{BlockHandle, ExecutionCounter};

/// One discovered basic block: entry address plus its execution counter.
#[derive(Debug)]
pub struct BlockRecord {
    /// Entry instruction address, assigned by the rewriting layer. Opaque
    /// key; never interpreted here.
    pub addr: u64,
    /// Executions of this block since registration.
    pub count: ExecutionCounter,
}

/// Append-only table of discovered blocks, in discovery order.
///
/// Each record is individually heap-allocated, so counter cells never move
/// when the table grows. The mutex guards only the append; increments never
/// take it, and increments to different counters never contend.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    records: Mutex<Vec<Arc<BlockRecord>>>,
}

impl BlockRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly discovered block and return its stable handle.
    ///
    /// Every call appends a fresh record: re-registering an address after
    /// re-translation yields an independent counter, not a merge. The
    /// rewriting layer reports each code region once per translation, so no
    /// lookup is needed here.
    pub fn register(&self, addr: u64) -> BlockHandle {
        let record = Arc::new(BlockRecord {
            addr,
            count: ExecutionCounter::new(),
        });
        self.records.lock().push(Arc::clone(&record));
        counter!("bbtrace_blocks_registered_total").increment(1);
        BlockHandle::new(record)
    }

    /// Number of registered blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if no blocks have been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Discovery-order view of the table, for report emission.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<BlockRecord>> {
        self.records.lock().clone()
    }
}
