//! Ownership of kernel object handles

use crate::windows::bindings::kernel32;
use tracing::debug;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winnt::HANDLE;

/// A kernel handle owned by exactly one value.
///
/// Process handles held by a `ResolvedProcess` and ToolHelp32 snapshots are
/// closed when their owner drops, and only then. The type is neither `Clone`
/// nor `Copy`, and null or `INVALID_HANDLE_VALUE` are never passed to
/// `CloseHandle`.
pub struct OwnedHandle(HANDLE);

impl OwnedHandle {
    /// Takes ownership of `raw`, which nothing else may close
    pub fn new(raw: HANDLE) -> Self {
        OwnedHandle(raw)
    }

    #[cfg(test)]
    pub(crate) fn null() -> Self {
        OwnedHandle(std::ptr::null_mut())
    }

    /// Whether the wrapped value refers to an open object
    pub fn is_valid(&self) -> bool {
        !self.0.is_null() && self.0 != INVALID_HANDLE_VALUE
    }

    /// Borrows the raw value for a single API call
    pub fn as_raw(&self) -> HANDLE {
        self.0
    }
}

impl Drop for OwnedHandle {
    fn drop(&mut self) {
        if !self.is_valid() {
            return;
        }
        // SAFETY: owned since construction, closed nowhere else
        if let Err(error) = unsafe { kernel32::close_handle(self.0) } {
            debug!(%error, "CloseHandle failed");
        }
    }
}

// A HANDLE is an index into the process-wide handle table
unsafe impl Send for OwnedHandle {}
unsafe impl Sync for OwnedHandle {}
