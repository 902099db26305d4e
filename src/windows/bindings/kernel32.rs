//! Kernel32.dll bindings for process access and memory reads

use crate::core::types::{MemoryError, MemoryResult};
use crate::windows::utils::ErrorCode;
use winapi::shared::minwindef::{FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::{CloseHandle, INVALID_HANDLE_VALUE};
use winapi::um::memoryapi::ReadProcessMemory;
use winapi::um::processthreadsapi::OpenProcess;
use winapi::um::tlhelp32::CreateToolhelp32Snapshot;
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> MemoryResult<HANDLE> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(MemoryError::open_failed(
                pid,
                ErrorCode::last_error().to_string(),
            ))
        } else {
            Ok(handle)
        }
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle that is not closed elsewhere
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() || handle == INVALID_HANDLE_VALUE {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(MemoryError::last_os_error())
    } else {
        Ok(())
    }
}

/// Safe wrapper for CreateToolhelp32Snapshot
pub fn create_snapshot(flags: u32, pid: u32) -> MemoryResult<HANDLE> {
    unsafe {
        let snapshot = CreateToolhelp32Snapshot(flags, pid);
        if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
            Err(MemoryError::EnumerationFailed(format!(
                "CreateToolhelp32Snapshot failed for pid {}: {}",
                pid,
                ErrorCode::last_error()
            )))
        } else {
            Ok(snapshot)
        }
    }
}

/// Safe wrapper for ReadProcessMemory, returning the number of bytes copied
///
/// # Safety
/// The handle must be a valid process handle with PROCESS_VM_READ access
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: usize,
    buffer: &mut [u8],
) -> MemoryResult<usize> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address as LPCVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        Err(MemoryError::read_failed(
            format!("0x{:X}", address),
            format!("ReadProcessMemory failed: {}", ErrorCode::last_error()),
        ))
    } else {
        Ok(bytes_read)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_null_handle_operations() {
        unsafe {
            assert!(close_handle(ptr::null_mut()).is_ok());

            let mut buffer = vec![0u8; 4];
            assert!(read_process_memory(ptr::null_mut(), 0x1000, &mut buffer).is_err());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_invalid_process() {
        let result = open_process(0, 0x0410);
        assert!(matches!(result, Err(MemoryError::OpenFailed { pid: 0, .. })));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_snapshot_of_missing_process_fails() {
        use winapi::um::tlhelp32::{TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32};
        let result = create_snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, 0xFFFF_FFF0);
        assert!(matches!(result, Err(MemoryError::EnumerationFailed(_))));
    }
}
