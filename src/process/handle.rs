//! Process handle wrapper with RAII semantics

use crate::core::types::{Address, AddressWidth, MemoryError, MemoryResult, ProcessId};
use crate::memory::access::ProcessMemory;
use crate::windows::bindings::{kernel32, ntdll};
use crate::windows::types::OwnedHandle;
use std::fmt;

/// Access rights for process handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Query information access
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Read memory access
    pub const VM_READ: Self = Self { value: 0x0010 };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        let mut value = 0;
        for right in rights {
            value |= right.value;
        }
        Self { value }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }
}

/// Read-only handle to a foreign process
pub struct ProcessHandle {
    handle: OwnedHandle,
    pid: ProcessId,
    access: ProcessAccess,
}

impl ProcessHandle {
    /// Open a process with specified access rights
    pub fn open(pid: ProcessId, access: ProcessAccess) -> MemoryResult<Self> {
        let raw_handle = kernel32::open_process(pid, access.value())?;
        Ok(ProcessHandle {
            handle: OwnedHandle::new(raw_handle),
            pid,
            access,
        })
    }

    /// Open a process for reading memory and querying its information
    pub fn open_for_read(pid: ProcessId) -> MemoryResult<Self> {
        Self::open(
            pid,
            ProcessAccess::combine(&[ProcessAccess::QUERY_INFORMATION, ProcessAccess::VM_READ]),
        )
    }

    /// Check if handle is valid
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    fn ensure_valid(&self) -> MemoryResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(MemoryError::InvalidHandle(
                "Process handle is null".to_string(),
            ))
        }
    }
}

impl ProcessMemory for ProcessHandle {
    fn pid(&self) -> ProcessId {
        self.pid
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.ensure_valid()?;
        unsafe { kernel32::read_process_memory(self.handle.as_raw(), address.as_usize(), buffer) }
    }

    fn detect_address_width(&self) -> MemoryResult<AddressWidth> {
        self.ensure_valid()?;
        let is_wow64 = unsafe { ntdll::is_wow64_process(self.handle.as_raw())? };
        Ok(AddressWidth::from_wow64(is_wow64))
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .field("access", &format!("0x{:X}", self.access.value()))
            .finish()
    }
}
