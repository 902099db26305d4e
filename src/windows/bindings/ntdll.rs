//! NTDLL.dll bindings for the WoW64 query

use crate::core::types::{MemoryError, MemoryResult};
use std::mem;
use winapi::shared::minwindef::ULONG;
use winapi::shared::ntdef::{NTSTATUS, PVOID};
use winapi::um::winnt::HANDLE;

// NT Status codes
pub const STATUS_SUCCESS: NTSTATUS = 0x00000000;
pub const STATUS_INVALID_HANDLE: NTSTATUS = 0xC0000008_u32 as i32;
pub const STATUS_ACCESS_DENIED: NTSTATUS = 0xC0000022_u32 as i32;

/// Process information class for NtQueryInformationProcess
#[repr(C)]
pub enum ProcessInfoClass {
    ProcessWow64Information = 26,
}

#[link(name = "ntdll")]
extern "system" {
    fn NtQueryInformationProcess(
        process_handle: HANDLE,
        process_info_class: ULONG,
        process_info: PVOID,
        process_info_length: ULONG,
        return_length: *mut ULONG,
    ) -> NTSTATUS;
}

/// Check if NTSTATUS indicates success
pub fn nt_success(status: NTSTATUS) -> bool {
    status >= 0
}

/// Query if process is WoW64 (32-bit on 64-bit Windows)
///
/// # Safety
/// The handle must be a valid process handle with query access
pub unsafe fn is_wow64_process(handle: HANDLE) -> MemoryResult<bool> {
    let mut wow64_peb: usize = 0;
    let mut return_length = 0u32;

    let status = NtQueryInformationProcess(
        handle,
        ProcessInfoClass::ProcessWow64Information as ULONG,
        &mut wow64_peb as *mut _ as PVOID,
        mem::size_of::<usize>() as ULONG,
        &mut return_length,
    );

    if nt_success(status) {
        Ok(wow64_peb != 0)
    } else {
        Err(MemoryError::WidthDetectionFailed(format!(
            "Failed to query WoW64 status: 0x{:X}",
            status
        )))
    }
}
