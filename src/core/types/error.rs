//! Error types for process inspection

use super::{AddressWidth, ProcessId};
use std::fmt;
use thiserror::Error;

/// Main error type for process and memory operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Enumeration failed: {0}")]
    EnumerationFailed(String),

    #[error("No supported game process found")]
    NoSupportedProcessFound,

    #[error("Failed to open process {pid}: {reason}")]
    OpenFailed { pid: ProcessId, reason: String },

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("{target} doesn't support the {width} version")]
    UnsupportedWidth { target: String, width: AddressWidth },

    #[error("Failed to read pointer at offset {level} ({address}): {reason}")]
    PointerReadFailed {
        level: usize,
        address: String,
        reason: String,
    },

    #[error("Null pointer encountered at offset {level}")]
    NullPointer { level: usize },

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Failed to determine process architecture: {0}")]
    WidthDetectionFailed(String),

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a new Windows API error with the last error code
    #[cfg(windows)]
    pub fn last_os_error() -> Self {
        MemoryError::WindowsApiError(windows::core::Error::from_win32())
    }

    /// Creates an open failed error for a process
    pub fn open_failed(pid: ProcessId, reason: impl Into<String>) -> Self {
        MemoryError::OpenFailed {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a pointer read failed error for one hop of a chain
    pub fn pointer_read_failed(
        level: usize,
        address: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        MemoryError::PointerReadFailed {
            level,
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether retrying against the same process instance can succeed.
    ///
    /// An unsupported width only changes when a different process replaces
    /// the current one.
    pub fn is_transient(&self) -> bool {
        !matches!(self, MemoryError::UnsupportedWidth { .. })
    }
}
