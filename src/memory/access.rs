//! Platform boundary for foreign-process access
//!
//! Everything above this module treats process enumeration, module
//! enumeration, remote reads, and width detection as opaque operations.

use crate::core::types::{
    Address, AddressWidth, MemoryError, MemoryResult, ModuleInfo, ProcessId, ProcessInfo,
};

/// An open, readable process. Dropping the value releases the handle.
pub trait ProcessMemory {
    /// Process this handle was opened for
    fn pid(&self) -> ProcessId;

    /// Copies remote memory into `buffer`, returning how many bytes were
    /// actually copied. Implementations may report fewer bytes than requested.
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize>;

    /// Queries whether the process runs under the 32-bit compatibility layer.
    /// Failures are reported, never replaced by a default width.
    fn detect_address_width(&self) -> MemoryResult<AddressWidth>;
}

/// Process introspection facilities of one operating system
pub trait ProcessPlatform: Send + Sync {
    type Handle: ProcessMemory;

    /// Lists running processes in the platform's enumeration order
    fn processes(&self) -> MemoryResult<Vec<ProcessInfo>>;

    /// Opens a process for memory reads and information queries
    fn open_process(&self, pid: ProcessId) -> MemoryResult<Self::Handle>;

    /// Lists the modules loaded in a process, main image first
    fn modules(&self, pid: ProcessId) -> MemoryResult<Vec<ModuleInfo>>;
}

/// Finds the load address of `module_name` (exact, case-sensitive match).
pub fn resolve_module_base<P>(
    platform: &P,
    pid: ProcessId,
    module_name: &str,
) -> MemoryResult<Address>
where
    P: ProcessPlatform + ?Sized,
{
    platform
        .modules(pid)?
        .into_iter()
        .find(|module| module.name == module_name)
        .map(|module| module.base_address)
        .ok_or_else(|| MemoryError::ModuleNotFound(module_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::simulated::{SimulatedPlatform, SimulatedProcess};

    fn platform_with_modules() -> SimulatedPlatform {
        let platform = SimulatedPlatform::new();
        platform.spawn(
            SimulatedProcess::new(100, "GameA.exe", AddressWidth::SixtyFourBit)
                .with_module("GameA.exe", Address::new(0x400000))
                .with_module("gamea.exe", Address::new(0x900000))
                .with_module("kernel32.dll", Address::new(0x7FF000000000)),
        );
        platform
    }

    #[test]
    fn test_resolve_module_base_exact_match() {
        let platform = platform_with_modules();
        let base = resolve_module_base(&platform, 100, "GameA.exe").unwrap();
        assert_eq!(base, Address::new(0x400000));
    }

    #[test]
    fn test_resolve_module_base_is_case_sensitive() {
        let platform = platform_with_modules();
        let base = resolve_module_base(&platform, 100, "gamea.exe").unwrap();
        assert_eq!(base, Address::new(0x900000));

        let result = resolve_module_base(&platform, 100, "GAMEA.exe");
        assert!(matches!(result, Err(MemoryError::ModuleNotFound(name)) if name == "GAMEA.exe"));
    }

    #[test]
    fn test_resolve_module_base_requires_suffix() {
        let platform = platform_with_modules();
        let result = resolve_module_base(&platform, 100, "GameA");
        assert!(matches!(result, Err(MemoryError::ModuleNotFound(_))));
    }

    #[test]
    fn test_resolve_module_base_unknown_process() {
        let platform = platform_with_modules();
        let result = resolve_module_base(&platform, 999, "GameA.exe");
        assert!(matches!(result, Err(MemoryError::EnumerationFailed(_))));
    }
}
