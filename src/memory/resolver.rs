//! Pointer-chain resolution from a module base to the counter cell

use crate::catalog::TargetDescriptor;
use crate::core::types::{Address, AddressWidth, MemoryError, MemoryResult, Offset, ProcessId};
use crate::memory::access::{resolve_module_base, ProcessMemory, ProcessPlatform};
use crate::memory::reader::{copy_remote_memory, decode_pointer, POINTER_READ_SIZE};
use tracing::trace;

/// Resolves a target's offset chain inside one process
pub struct PointerChainResolver<'a, P: ProcessPlatform + ?Sized> {
    platform: &'a P,
}

impl<'a, P: ProcessPlatform + ?Sized> PointerChainResolver<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        PointerChainResolver { platform }
    }

    /// Returns the address of the counter cell. The cell itself is not read.
    ///
    /// Fails with `UnsupportedWidth` before touching the process when the
    /// target has no chain for `width`.
    pub fn resolve(
        &self,
        handle: &P::Handle,
        pid: ProcessId,
        target: &TargetDescriptor,
        width: AddressWidth,
    ) -> MemoryResult<Address> {
        let offsets = target
            .offsets_for(width)
            .ok_or_else(|| MemoryError::UnsupportedWidth {
                target: target.name.clone(),
                width,
            })?;

        let base = resolve_module_base(self.platform, pid, &target.module_name())?;
        trace!(pid, module = %target.module_name(), base = %base, "Resolved module base");

        follow_chain(handle, base, offsets, width)
    }
}

/// Walks `offsets` from `base`.
///
/// Every offset but the last is followed by an 8-byte read decoded at the
/// target's width; the last offset only produces the final address. An
/// empty chain yields `base`.
pub fn follow_chain<M>(
    memory: &M,
    base: Address,
    offsets: &[Offset],
    width: AddressWidth,
) -> MemoryResult<Address>
where
    M: ProcessMemory + ?Sized,
{
    let Some((last, hops)) = offsets.split_last() else {
        return Ok(base);
    };

    let mut address = base;
    for (level, offset) in hops.iter().enumerate() {
        address = address.offset(*offset);

        let bytes = copy_remote_memory(memory, address, POINTER_READ_SIZE).map_err(|error| {
            let reason = match error {
                MemoryError::ReadFailed { reason, .. } => reason,
                other => other.to_string(),
            };
            MemoryError::pointer_read_failed(level, address, reason)
        })?;

        let next = decode_pointer(&bytes, width)?;
        trace!(level, at = %address, pointer = %next, "Dereferenced pointer");
        if next.is_null() {
            return Err(MemoryError::NullPointer { level });
        }
        address = next;
    }

    Ok(address.offset(*last))
}
