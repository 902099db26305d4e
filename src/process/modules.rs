//! Module enumeration using Windows ToolHelp32 API

use crate::core::types::{Address, MemoryError, MemoryResult, ModuleInfo, ProcessId};
use crate::windows::bindings::kernel32;
use crate::windows::types::OwnedHandle;
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::tlhelp32::{
    Module32FirstW, Module32NextW, MODULEENTRY32W, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32,
};

/// Enumerates modules loaded in a process, including 32-bit modules of
/// WoW64 processes
pub struct ModuleEnumerator {
    pid: ProcessId,
}

impl ModuleEnumerator {
    /// Create a new module enumerator for a process
    pub fn new(pid: ProcessId) -> Self {
        ModuleEnumerator { pid }
    }

    /// Enumerate all modules in the process, main image first
    pub fn enumerate(&self) -> MemoryResult<Vec<ModuleInfo>> {
        let snapshot = OwnedHandle::new(kernel32::create_snapshot(
            TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32,
            self.pid,
        )?);

        let mut modules = Vec::new();
        unsafe {
            let mut entry: MODULEENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<MODULEENTRY32W>() as u32;

            let mut success = Module32FirstW(snapshot.as_raw(), &mut entry);
            while success != FALSE {
                modules.push(ModuleInfo::new(
                    wide_to_string(&entry.szModule),
                    Address::from(entry.modBaseAddr as usize),
                    entry.modBaseSize as usize,
                ));
                success = Module32NextW(snapshot.as_raw(), &mut entry);
            }
        }

        let code = ErrorCode::last_error();
        if !code.is_end_of_enumeration() {
            return Err(MemoryError::EnumerationFailed(format!(
                "Module walk for process {} failed: {}",
                self.pid, code
            )));
        }

        Ok(modules)
    }
}

/// Enumerate modules for a specific process
pub fn enumerate_modules(pid: ProcessId) -> MemoryResult<Vec<ModuleInfo>> {
    ModuleEnumerator::new(pid).enumerate()
}
