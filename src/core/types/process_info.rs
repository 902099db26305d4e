//! Process, module, and address width types

use super::{Address, ProcessId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A running process as reported by the platform's process listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: ProcessId,
    /// Executable file name, including its extension
    pub name: String,
}

impl ProcessInfo {
    /// Creates a new ProcessInfo with minimal information
    pub fn new(pid: ProcessId, name: impl Into<String>) -> Self {
        ProcessInfo {
            pid,
            name: name.into(),
        }
    }
}

/// Information about a loaded module in a process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    /// Image name, e.g. `DarkSoulsIII.exe`
    pub name: String,
    pub base_address: Address,
    pub size: usize,
}

impl ModuleInfo {
    /// Creates a new ModuleInfo
    pub fn new(name: impl Into<String>, base_address: Address, size: usize) -> Self {
        ModuleInfo {
            name: name.into(),
            base_address,
            size,
        }
    }
}

/// Pointer width of a target process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressWidth {
    ThirtyTwoBit,
    SixtyFourBit,
}

impl AddressWidth {
    /// Width for a process that is (or is not) running under WoW64
    pub const fn from_wow64(is_wow64: bool) -> Self {
        if is_wow64 {
            return AddressWidth::ThirtyTwoBit;
        }
        // Native processes share the host's width
        #[cfg(target_pointer_width = "64")]
        {
            AddressWidth::SixtyFourBit
        }
        #[cfg(not(target_pointer_width = "64"))]
        {
            AddressWidth::ThirtyTwoBit
        }
    }
}

impl fmt::Display for AddressWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressWidth::ThirtyTwoBit => write!(f, "32-bit"),
            AddressWidth::SixtyFourBit => write!(f, "64-bit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wow64_is_always_32bit() {
        assert_eq!(AddressWidth::from_wow64(true), AddressWidth::ThirtyTwoBit);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_native_process_on_64bit_host() {
        assert_eq!(AddressWidth::from_wow64(false), AddressWidth::SixtyFourBit);
    }

    #[test]
    fn test_width_display() {
        assert_eq!(AddressWidth::ThirtyTwoBit.to_string(), "32-bit");
        assert_eq!(AddressWidth::SixtyFourBit.to_string(), "64-bit");
    }
}
