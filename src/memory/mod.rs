//! Remote memory access and pointer-chain resolution
//!
//! This module provides:
//! - The platform boundary traits (`ProcessPlatform`, `ProcessMemory`)
//! - Length-checked reads with explicit little-endian decoding
//! - The pointer-chain resolver shared by every catalog entry
//! - An in-memory platform for tests and demos

pub mod access;
pub mod reader;
pub mod resolver;
pub mod simulated;

pub use access::{resolve_module_base, ProcessMemory, ProcessPlatform};
pub use reader::{copy_remote_memory, decode_i32, decode_pointer, read_i32};
pub use resolver::{follow_chain, PointerChainResolver};
pub use simulated::{SimulatedHandle, SimulatedPlatform, SimulatedProcess};
