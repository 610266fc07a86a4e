//! Memory address wrapper for the target process address space

use std::fmt;

/// An address in the target process, with type-safe offset arithmetic.
///
/// Only valid while the target process is alive; a module base must be
/// re-resolved for every session since it can change between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub usize);

impl Address {
    /// Creates a new address from a usize value
    pub const fn new(value: usize) -> Self {
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

    /// Returns this address plus a fixed byte offset
    pub const fn add(&self, offset: usize) -> Self {
        Address(self.0 + offset)
    }

    /// Returns the raw usize value
    pub const fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<usize> for Address {
    fn from(value: usize) -> Self {
        Address::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_basics() {
        let addr = Address::new(0x1000);
        assert_eq!(addr.as_usize(), 0x1000);
        assert!(!addr.is_null());

        let null = Address::null();
        assert!(null.is_null());
    }

    #[test]
    fn test_address_add() {
        let base = Address::new(0x0100_0000);
        assert_eq!(base.add(0x374F), Address::new(0x0100_374F));
        assert_eq!(base.add(0), base);
    }

    #[test]
    fn test_address_display() {
        let addr = Address::new(0xDEAD);
        assert_eq!(addr.to_string(), "0x0000DEAD");
        assert_eq!(format!("{:x}", addr), "0x0000dead");
    }

    #[test]
    fn test_address_from_usize() {
        let addr: Address = 0x2000usize.into();
        assert_eq!(addr, Address::new(0x2000));
    }
}
