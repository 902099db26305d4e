//! Live Windows implementation of the process platform

use crate::core::types::{MemoryResult, ModuleInfo, ProcessId, ProcessInfo};
use crate::memory::access::ProcessPlatform;
use crate::process::enumerator::enumerate_processes;
use crate::process::handle::ProcessHandle;
use crate::process::modules::enumerate_modules;

/// Reads real processes through ToolHelp32, OpenProcess and ReadProcessMemory
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        WindowsPlatform
    }
}

impl ProcessPlatform for WindowsPlatform {
    type Handle = ProcessHandle;

    fn processes(&self) -> MemoryResult<Vec<ProcessInfo>> {
        enumerate_processes()
    }

    fn open_process(&self, pid: ProcessId) -> MemoryResult<ProcessHandle> {
        ProcessHandle::open_for_read(pid)
    }

    fn modules(&self, pid: ProcessId) -> MemoryResult<Vec<ModuleInfo>> {
        enumerate_modules(pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::access::resolve_module_base;
    use crate::memory::ProcessMemory;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_current_process_through_platform() {
        let platform = WindowsPlatform::new();
        let pid = std::process::id();

        let me = platform
            .processes()
            .unwrap()
            .into_iter()
            .find(|p| p.pid == pid)
            .unwrap();
        let base = resolve_module_base(&platform, pid, &me.name).unwrap();
        assert!(!base.is_null());

        let handle = platform.open_process(pid).unwrap();
        assert_eq!(handle.pid(), pid);
        assert!(handle.detect_address_width().is_ok());
    }
}
