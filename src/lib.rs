//! Death counter library
//!
//! Locates a running supported game, follows a pointer chain through its
//! memory, and publishes the current death count.

pub mod catalog;
pub mod config;
pub mod core;
pub mod memory;
pub mod monitor;
pub mod process;
#[cfg(windows)]
pub mod windows;

// Re-export main types from core module
pub use core::types::{
    Address, AddressWidth, MemoryError, MemoryResult, ModuleInfo, Offset, ProcessId, ProcessInfo,
};

pub use catalog::{Catalog, CatalogError, TargetDescriptor};
pub use memory::{ProcessMemory, ProcessPlatform, SimulatedPlatform, SimulatedProcess};
pub use monitor::{MonitorService, MonitorSnapshot, PollIntervals, PollOutcome, SharedState};
#[cfg(windows)]
pub use windows::WindowsPlatform;
