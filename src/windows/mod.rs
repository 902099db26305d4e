//! Windows API layer for process inspection
//!
//! Provides safe wrappers around the Windows API functions the monitor
//! needs. All unsafe FFI calls are contained within this module with
//! proper error handling.

pub mod bindings;
pub mod platform;
pub mod types;
pub mod utils;

pub use platform::WindowsPlatform;
pub use types::OwnedHandle;
pub use utils::ErrorCode;
