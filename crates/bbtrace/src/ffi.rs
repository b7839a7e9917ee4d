//! FFI boundary for C instrumentation substrates.
//!
//! The rewriting layer calls these extern functions: once per newly
//! discovered basic block, once per block execution through the returned
//! counter pointer, and once at target exit. The `FfiSessionPtr` argument
//! contains an `inner` pointer to the actual Rust session.
//!
//! # Safety
//!
//! The caller (C code) must ensure:
//! - `session` is a valid pointer to an `FfiSessionPtr` struct
//! - `session->inner` is a valid pointer produced by [`FfiSessionPtr::from_boxed`]
//! - counter pointers returned by `bbtrace_block_discovered` are not used
//!   after `bbtrace_fini` has consumed the session

use std::ffi::c_void;

use tracing::error;

use crate::counter::ExecutionCounter;
use crate::session::TraceSession;

/// Session pointer struct matching the C-side typedef:
///
/// ```c
/// typedef struct BbtraceSession {
///     void* inner;
/// } BbtraceSession;
/// ```
#[repr(C)]
pub struct FfiSessionPtr {
    pub inner: *mut c_void,
}

impl FfiSessionPtr {
    /// Create from a boxed session.
    ///
    /// The returned struct owns the session; pass it to `bbtrace_fini`
    /// exactly once to emit the report and reclaim it.
    #[must_use]
    pub fn from_boxed(session: Box<TraceSession>) -> Self {
        Self {
            inner: Box::into_raw(session).cast::<c_void>(),
        }
    }

    /// Get a shared reference to the session.
    ///
    /// # Safety
    /// `inner` must be a valid pointer from `from_boxed`.
    unsafe fn as_session(&self) -> &TraceSession {
        unsafe { &*self.inner.cast::<TraceSession>() }
    }
}

/// New basic block discovered at `addr`.
///
/// Registers the block and returns the stable counter cell the substrate
/// wires into the block's inserted analysis call. Returns null if `session`
/// is null or already finished.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bbtrace_block_discovered(
    session: *mut FfiSessionPtr,
    addr: u64,
) -> *const ExecutionCounter {
    unsafe {
        if session.is_null() || (*session).inner.is_null() {
            return std::ptr::null();
        }
        let handle = (*session).as_session().register_block(addr);
        handle.as_counter_ptr()
    }
}

/// The inserted analysis call: one execution of a registered block.
///
/// A single atomic increment; safe under arbitrary concurrent invocation
/// from any number of target threads.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bbtrace_block_hit(counter: *const ExecutionCounter) {
    unsafe {
        if !counter.is_null() {
            (*counter).bump();
        }
    }
}

/// Target program is exiting with `code`.
///
/// Consumes the session, emits the report, and frees the block table.
/// Subsequent calls with the same struct are no-ops.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn bbtrace_fini(session: *mut FfiSessionPtr, code: i32) {
    unsafe {
        if session.is_null() || (*session).inner.is_null() {
            return;
        }
        let boxed = Box::from_raw((*session).inner.cast::<TraceSession>());
        (*session).inner = std::ptr::null_mut();
        if let Err(err) = boxed.finish() {
            error!(%err, code, "failed to write execution profile");
        }
    }
}
