//! Metric descriptions.

use metrics::{Unit, describe_counter};

/// Register metric descriptions.
///
/// Call once at startup from hosts that install a `metrics` recorder;
/// without a recorder the profiler's metric calls are no-ops.
pub fn init() {
    describe_counter!(
        "bbtrace_blocks_registered_total",
        Unit::Count,
        "Total basic blocks registered for instrumentation"
    );
    describe_counter!(
        "bbtrace_blocks_reported_total",
        Unit::Count,
        "Total basic blocks written to the execution profile"
    );
}
