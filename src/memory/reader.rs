//! Length-checked remote reads and little-endian decoding

use crate::core::types::{Address, AddressWidth, MemoryError, MemoryResult};
use crate::memory::access::ProcessMemory;

/// Bytes requested for every pointer dereference, whatever the target width
pub const POINTER_READ_SIZE: usize = 8;

/// Size of the counter cell at the end of a chain
pub const COUNTER_SIZE: usize = 4;

/// Copies exactly `length` bytes out of the process.
///
/// A short read is an error; the result is never padded.
pub fn copy_remote_memory<M>(memory: &M, address: Address, length: usize) -> MemoryResult<Vec<u8>>
where
    M: ProcessMemory + ?Sized,
{
    let mut buffer = vec![0u8; length];
    let read = memory.read_memory(address, &mut buffer)?;
    if read != length {
        return Err(MemoryError::read_failed(
            address,
            format!("partial read: got {} bytes, expected {}", read, length),
        ));
    }
    Ok(buffer)
}

/// Decodes a pointer of the given width from the start of `bytes`.
///
/// 32-bit pointers are read as `i32` and sign-extended, as the games store
/// them as signed values.
pub fn decode_pointer(bytes: &[u8], width: AddressWidth) -> MemoryResult<Address> {
    let value = match width {
        AddressWidth::ThirtyTwoBit => i64::from(i32::from_le_bytes(take_array(bytes)?)),
        AddressWidth::SixtyFourBit => i64::from_le_bytes(take_array(bytes)?),
    };
    Ok(Address::from(value))
}

/// Decodes a little-endian `i32` from the start of `bytes`
pub fn decode_i32(bytes: &[u8]) -> MemoryResult<i32> {
    Ok(i32::from_le_bytes(take_array(bytes)?))
}

/// Reads the 4-byte signed counter at `address`
pub fn read_i32<M>(memory: &M, address: Address) -> MemoryResult<i32>
where
    M: ProcessMemory + ?Sized,
{
    let bytes = copy_remote_memory(memory, address, COUNTER_SIZE)?;
    decode_i32(&bytes)
}

fn take_array<const N: usize>(bytes: &[u8]) -> MemoryResult<[u8; N]> {
    bytes
        .get(..N)
        .and_then(|prefix| prefix.try_into().ok())
        .ok_or(MemoryError::BufferTooSmall {
            expected: N,
            actual: bytes.len(),
        })
}
