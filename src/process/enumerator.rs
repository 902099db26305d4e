//! Process enumeration using Windows ToolHelp32 API

use crate::core::types::{MemoryError, MemoryResult, ProcessInfo};
use crate::windows::bindings::kernel32;
use crate::windows::types::OwnedHandle;
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::tlhelp32::{Process32FirstW, Process32NextW, PROCESSENTRY32W, TH32CS_SNAPPROCESS};

/// Iterates a process snapshot.
///
/// Yields `Err` once if the snapshot walk fails for any reason other than
/// reaching the end.
pub struct ProcessEnumerator {
    snapshot: OwnedHandle,
    first_called: bool,
    finished: bool,
}

impl ProcessEnumerator {
    /// Create a new process enumerator
    pub fn new() -> MemoryResult<Self> {
        let snapshot = kernel32::create_snapshot(TH32CS_SNAPPROCESS, 0)?;
        Ok(ProcessEnumerator {
            snapshot: OwnedHandle::new(snapshot),
            first_called: false,
            finished: false,
        })
    }

    fn next_process(&mut self) -> Option<MemoryResult<ProcessInfo>> {
        if self.finished {
            return None;
        }

        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32FirstW(self.snapshot.as_raw(), &mut entry)
            } else {
                Process32NextW(self.snapshot.as_raw(), &mut entry)
            };

            if success == FALSE {
                self.finished = true;
                let code = ErrorCode::last_error();
                if code.is_end_of_enumeration() {
                    return None;
                }
                return Some(Err(MemoryError::EnumerationFailed(format!(
                    "Process32NextW failed: {}",
                    code
                ))));
            }

            Some(Ok(ProcessInfo::new(
                entry.th32ProcessID,
                wide_to_string(&entry.szExeFile),
            )))
        }
    }
}

impl Iterator for ProcessEnumerator {
    type Item = MemoryResult<ProcessInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_process()
    }
}

/// Enumerate all running processes
pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    ProcessEnumerator::new()?.collect()
}
