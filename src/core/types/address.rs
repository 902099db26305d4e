//! Remote address wrapper with signed offset arithmetic

use serde::{Deserialize, Serialize};
use std::fmt;

/// An address inside a target process.
///
/// Always 64 bits wide, even for 32-bit targets: offsets are applied to a
/// 64-bit accumulator and only the dereference width depends on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub u64);

impl Address {
    /// Creates a new address from a raw value
    pub const fn new(value: u64) -> Self {
        Address(value)
    }

    /// Creates a null address (0x0)
    pub const fn null() -> Self {
        Address(0)
    }

    /// Checks if the address is null
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Adds a signed offset to the address, wrapping on overflow
    pub const fn offset(&self, offset: i64) -> Self {
        Address(self.0.wrapping_add_signed(offset))
    }

    /// Returns the raw value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the address as a host-sized integer, as the read APIs expect
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl From<u64> for Address {
    fn from(value: u64) -> Self {
        Address::new(value)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Address::new(value as u64)
    }
}

impl From<i64> for Address {
    /// Reinterprets a decoded (possibly sign-extended) pointer value
    fn from(value: i64) -> Self {
        Address::new(value as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_offset() {
        let addr = Address::new(0x1000);
        assert_eq!(addr.offset(0x10), Address::new(0x1010));
        assert_eq!(addr.offset(-0x10), Address::new(0x0FF0));
    }

    #[test]
    fn test_offset_wraps_instead_of_panicking() {
        assert_eq!(Address::new(u64::MAX).offset(1), Address::null());
        assert_eq!(Address::null().offset(-1), Address::new(u64::MAX));
    }

    #[test]
    fn test_null_address() {
        assert!(Address::null().is_null());
        assert!(!Address::new(0x400000).is_null());
    }

    #[test]
    fn test_address_display() {
        let addr = Address::new(0xDEADBEEF);
        assert_eq!(format!("{}", addr), "0xDEADBEEF");
    }

    #[test]
    fn test_from_signed_pointer() {
        assert_eq!(Address::from(-1i64), Address::new(u64::MAX));
        assert_eq!(Address::from(0x500000i64), Address::new(0x500000));
    }
}
