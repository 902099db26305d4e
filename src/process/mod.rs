//! Process discovery
//!
//! The locator is platform independent; handles, process enumeration and
//! module enumeration are implemented for Windows.

#[cfg(windows)]
pub mod enumerator;
#[cfg(windows)]
pub mod handle;
pub mod locator;
#[cfg(windows)]
pub mod modules;

#[cfg(windows)]
pub use enumerator::{enumerate_processes, ProcessEnumerator};
#[cfg(windows)]
pub use handle::{ProcessAccess, ProcessHandle};
pub use locator::{ProcessLocator, ResolvedProcess};
#[cfg(windows)]
pub use modules::{enumerate_modules, ModuleEnumerator};
