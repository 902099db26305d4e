//! In-memory process platform
//!
//! Models a set of running processes with loaded modules and a sparse,
//! byte-addressed memory. Reads only succeed over bytes that were written,
//! so short reads and unmapped addresses behave like they do on a live
//! system. Used by the test suite and by the binary's demo mode.

use crate::core::types::{
    Address, AddressWidth, MemoryError, MemoryResult, ModuleInfo, ProcessId, ProcessInfo,
};
use crate::memory::access::{ProcessMemory, ProcessPlatform};
use crate::memory::reader::POINTER_READ_SIZE;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const SIMULATED_MODULE_SIZE: usize = 0x1000_0000;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A fake process: identity, modules, memory, and failure switches
#[derive(Debug)]
pub struct SimulatedProcess {
    pid: ProcessId,
    name: String,
    width: AddressWidth,
    modules: Vec<ModuleInfo>,
    memory: Mutex<BTreeMap<u64, u8>>,
    reads: AtomicUsize,
    deny_open: AtomicBool,
    fail_width_detection: AtomicBool,
}

impl SimulatedProcess {
    pub fn new(pid: ProcessId, name: impl Into<String>, width: AddressWidth) -> Self {
        SimulatedProcess {
            pid,
            name: name.into(),
            width,
            modules: Vec::new(),
            memory: Mutex::new(BTreeMap::new()),
            reads: AtomicUsize::new(0),
            deny_open: AtomicBool::new(false),
            fail_width_detection: AtomicBool::new(false),
        }
    }

    /// Adds a loaded module
    pub fn with_module(mut self, name: impl Into<String>, base: Address) -> Self {
        self.modules
            .push(ModuleInfo::new(name, base, SIMULATED_MODULE_SIZE));
        self
    }

    /// Maps and fills bytes starting at `address`
    pub fn with_bytes(self, address: Address, bytes: &[u8]) -> Self {
        self.write_bytes(address, bytes);
        self
    }

    /// Stores a pointer of the process's width at `address`
    pub fn with_pointer(self, address: Address, target: Address) -> Self {
        self.write_pointer(address, target);
        self
    }

    /// Stores a 4-byte signed value at `address`
    pub fn with_i32(self, address: Address, value: i32) -> Self {
        self.write_i32(address, value);
        self
    }

    /// Makes every open attempt fail
    pub fn denying_open(self) -> Self {
        self.set_deny_open(true);
        self
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> AddressWidth {
        self.width
    }

    pub fn write_bytes(&self, address: Address, bytes: &[u8]) {
        let mut memory = lock(&self.memory);
        for (index, byte) in bytes.iter().enumerate() {
            memory.insert(address.offset(index as i64).as_u64(), *byte);
        }
    }

    /// Writes a pointer of the process's width.
    ///
    /// The cell is mapped out to the full pointer read size (zero filled)
    /// so 8-byte dereference reads succeed for 32-bit targets as well.
    pub fn write_pointer(&self, address: Address, target: Address) {
        {
            let mut memory = lock(&self.memory);
            for index in 0..POINTER_READ_SIZE {
                memory
                    .entry(address.offset(index as i64).as_u64())
                    .or_insert(0);
            }
        }
        match self.width {
            AddressWidth::ThirtyTwoBit => {
                self.write_bytes(address, &(target.as_u64() as u32).to_le_bytes())
            }
            AddressWidth::SixtyFourBit => self.write_bytes(address, &target.as_u64().to_le_bytes()),
        }
    }

    pub fn write_i32(&self, address: Address, value: i32) {
        self.write_bytes(address, &value.to_le_bytes());
    }

    pub fn set_deny_open(&self, deny: bool) {
        self.deny_open.store(deny, Ordering::SeqCst);
    }

    pub fn set_fail_width_detection(&self, fail: bool) {
        self.fail_width_detection.store(fail, Ordering::SeqCst);
    }

    /// Number of remote read calls made against this process
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read_into(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let memory = lock(&self.memory);

        let mut copied = 0;
        for (index, slot) in buffer.iter_mut().enumerate() {
            match memory.get(&address.offset(index as i64).as_u64()) {
                Some(byte) => {
                    *slot = *byte;
                    copied += 1;
                }
                None => break,
            }
        }

        if copied == 0 && !buffer.is_empty() {
            return Err(MemoryError::read_failed(address, "address is not mapped"));
        }
        Ok(copied)
    }
}

/// An open handle to a [`SimulatedProcess`]
#[derive(Debug)]
pub struct SimulatedHandle {
    process: Arc<SimulatedProcess>,
    open_handles: Arc<AtomicUsize>,
}

impl ProcessMemory for SimulatedHandle {
    fn pid(&self) -> ProcessId {
        self.process.pid
    }

    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.process.read_into(address, buffer)
    }

    fn detect_address_width(&self) -> MemoryResult<AddressWidth> {
        if self.process.fail_width_detection.load(Ordering::SeqCst) {
            return Err(MemoryError::WidthDetectionFailed(format!(
                "query failed for process {}",
                self.process.pid
            )));
        }
        Ok(self.process.width)
    }
}

impl Drop for SimulatedHandle {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A set of simulated processes that can start and exit at any time
#[derive(Debug, Default)]
pub struct SimulatedPlatform {
    processes: Mutex<Vec<Arc<SimulatedProcess>>>,
    fail_enumeration: AtomicBool,
    open_handles: Arc<AtomicUsize>,
}

impl SimulatedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a process; it is listed after every process already running
    pub fn spawn(&self, process: SimulatedProcess) -> Arc<SimulatedProcess> {
        let process = Arc::new(process);
        lock(&self.processes).push(Arc::clone(&process));
        process
    }

    /// Ends a process. Handles already open keep working until dropped.
    pub fn kill(&self, pid: ProcessId) -> bool {
        let mut processes = lock(&self.processes);
        let before = processes.len();
        processes.retain(|process| process.pid != pid);
        processes.len() != before
    }

    pub fn set_fail_enumeration(&self, fail: bool) {
        self.fail_enumeration.store(fail, Ordering::SeqCst);
    }

    /// Handles opened and not yet dropped
    pub fn open_handle_count(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    fn find(&self, pid: ProcessId) -> Option<Arc<SimulatedProcess>> {
        lock(&self.processes)
            .iter()
            .find(|process| process.pid == pid)
            .cloned()
    }
}

impl ProcessPlatform for SimulatedPlatform {
    type Handle = SimulatedHandle;

    fn processes(&self) -> MemoryResult<Vec<ProcessInfo>> {
        if self.fail_enumeration.load(Ordering::SeqCst) {
            return Err(MemoryError::EnumerationFailed(
                "process snapshot unavailable".to_string(),
            ));
        }
        Ok(lock(&self.processes)
            .iter()
            .map(|process| ProcessInfo::new(process.pid, process.name.clone()))
            .collect())
    }

    fn open_process(&self, pid: ProcessId) -> MemoryResult<SimulatedHandle> {
        let process = self
            .find(pid)
            .ok_or_else(|| MemoryError::open_failed(pid, "process has exited"))?;
        if process.deny_open.load(Ordering::SeqCst) {
            return Err(MemoryError::open_failed(pid, "access is denied"));
        }
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Ok(SimulatedHandle {
            process,
            open_handles: Arc::clone(&self.open_handles),
        })
    }

    fn modules(&self, pid: ProcessId) -> MemoryResult<Vec<ModuleInfo>> {
        self.find(pid)
            .map(|process| process.modules.clone())
            .ok_or_else(|| {
                MemoryError::EnumerationFailed(format!("module snapshot failed for process {}", pid))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order_follows_spawn_order() {
        let platform = SimulatedPlatform::new();
        platform.spawn(SimulatedProcess::new(1, "a.exe", AddressWidth::SixtyFourBit));
        platform.spawn(SimulatedProcess::new(2, "b.exe", AddressWidth::SixtyFourBit));

        let names: Vec<String> = platform
            .processes()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["a.exe", "b.exe"]);
    }

    #[test]
    fn test_handle_count_tracks_drops() {
        let platform = SimulatedPlatform::new();
        platform.spawn(SimulatedProcess::new(1, "a.exe", AddressWidth::SixtyFourBit));

        let first = platform.open_process(1).unwrap();
        let second = platform.open_process(1).unwrap();
        assert_eq!(platform.open_handle_count(), 2);

        drop(first);
        assert_eq!(platform.open_handle_count(), 1);
        drop(second);
        assert_eq!(platform.open_handle_count(), 0);
    }

    #[test]
    fn test_open_fails_for_denied_and_exited_processes() {
        let platform = SimulatedPlatform::new();
        platform.spawn(SimulatedProcess::new(1, "a.exe", AddressWidth::SixtyFourBit).denying_open());
        platform.spawn(SimulatedProcess::new(2, "b.exe", AddressWidth::SixtyFourBit));
        assert!(platform.kill(2));

        assert!(matches!(
            platform.open_process(1),
            Err(MemoryError::OpenFailed { pid: 1, .. })
        ));
        assert!(matches!(
            platform.open_process(2),
            Err(MemoryError::OpenFailed { pid: 2, .. })
        ));
        assert_eq!(platform.open_handle_count(), 0);
    }

    #[test]
    fn test_unmapped_read_fails_and_partial_read_is_reported() {
        let platform = SimulatedPlatform::new();
        platform.spawn(
            SimulatedProcess::new(1, "a.exe", AddressWidth::SixtyFourBit)
                .with_bytes(Address::new(0x10), &[0xAA, 0xBB]),
        );
        let handle = platform.open_process(1).unwrap();

        let mut buffer = [0u8; 4];
        assert!(handle.read_memory(Address::new(0x20), &mut buffer).is_err());
        assert_eq!(handle.read_memory(Address::new(0x10), &mut buffer).unwrap(), 2);
        assert_eq!(&buffer[..2], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_32bit_pointer_is_readable_as_8_bytes() {
        let platform = SimulatedPlatform::new();
        platform.spawn(
            SimulatedProcess::new(1, "a.exe", AddressWidth::ThirtyTwoBit)
                .with_pointer(Address::new(0x100), Address::new(0x1234_5678)),
        );
        let handle = platform.open_process(1).unwrap();

        let mut buffer = [0u8; 8];
        assert_eq!(handle.read_memory(Address::new(0x100), &mut buffer).unwrap(), 8);
        assert_eq!(&buffer[..4], &0x1234_5678u32.to_le_bytes());
        assert_eq!(&buffer[4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_width_detection_failure_switch() {
        let platform = SimulatedPlatform::new();
        let process =
            platform.spawn(SimulatedProcess::new(1, "a.exe", AddressWidth::ThirtyTwoBit));
        let handle = platform.open_process(1).unwrap();
        assert_eq!(
            handle.detect_address_width().unwrap(),
            AddressWidth::ThirtyTwoBit
        );

        process.set_fail_width_detection(true);
        assert!(matches!(
            handle.detect_address_width(),
            Err(MemoryError::WidthDetectionFailed(_))
        ));
    }

    #[test]
    fn test_enumeration_failure_switch() {
        let platform = SimulatedPlatform::new();
        platform.set_fail_enumeration(true);
        assert!(matches!(
            platform.processes(),
            Err(MemoryError::EnumerationFailed(_))
        ));
    }
}
