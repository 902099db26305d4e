//! Core module containing fundamental types
//!
//! Provides address handling, process and module descriptions, the
//! address width model, and the crate-wide error type.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Address, AddressWidth, MemoryError, MemoryResult, ModuleInfo, Offset, ProcessId, ProcessInfo,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
