//! Core type definitions
//!
//! This module contains the fundamental types shared by the platform layer,
//! the pointer-chain resolver, and the monitor.

mod address;
mod error;
mod process_info;

// Re-export all public types
pub use address::Address;
pub use error::{MemoryError, MemoryResult};
pub use process_info::{AddressWidth, ModuleInfo, ProcessInfo};

// Common type aliases
pub type ProcessId = u32;
pub type Offset = i64;
