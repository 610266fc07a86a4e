//! Remote process access seam
//!
//! Everything the injector and orchestrator need from a foreign address
//! space goes through the [`RemoteProcess`] trait, so the machinery can be
//! exercised against a counting fake in tests. The Windows implementation
//! lives in `remote` and is backed by a [`crate::process::ProcessHandle`].

use std::time::Duration;

use tracing::warn;

use crate::core::types::{Address, MemoryResult};

#[cfg(test)]
pub mod mock;
#[cfg(windows)]
mod remote;

/// Page protection for remote allocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    ReadWrite,
    ExecuteReadWrite,
}

/// How a bounded remote thread join finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Completed,
    TimedOut,
}

/// Operations against a foreign process address space.
///
/// Reads and writes are single bounded operations; a transfer shorter than
/// requested is the same failure class as a hard fault.
pub trait RemoteProcess {
    fn read_bytes(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<()>;
    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()>;

    /// Reserves and commits a region in the target
    fn alloc(&self, size: usize, protection: Protection) -> MemoryResult<Address>;

    /// Releases a region previously returned by [`RemoteProcess::alloc`]
    fn free(&self, address: Address) -> MemoryResult<()>;

    /// Starts a thread in the target at `entry` with `arg` as its sole
    /// parameter and waits for it up to `timeout`
    fn spawn_and_wait(
        &self,
        entry: Address,
        arg: Address,
        timeout: Duration,
    ) -> MemoryResult<JoinOutcome>;

    fn read_u8(&self, address: Address) -> MemoryResult<u8> {
        let mut buffer = [0u8; 1];
        self.read_bytes(address, &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_u32(&self, address: Address) -> MemoryResult<u32> {
        let mut buffer = [0u8; 4];
        self.read_bytes(address, &mut buffer)?;
        Ok(u32::from_le_bytes(buffer))
    }
}

/// Owns one remote allocation and releases it when dropped, on every exit
/// path. Mirrors the handle guards: allocation count always equals release
/// count.
pub struct RemoteRegion<'p, P: RemoteProcess + ?Sized> {
    process: &'p P,
    address: Address,
    size: usize,
}

impl<'p, P: RemoteProcess + ?Sized> RemoteRegion<'p, P> {
    /// Allocates `size` bytes in the target
    pub fn alloc(process: &'p P, size: usize, protection: Protection) -> MemoryResult<Self> {
        let address = process.alloc(size, protection)?;
        Ok(RemoteRegion {
            process,
            address,
            size,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<P: RemoteProcess + ?Sized> Drop for RemoteRegion<'_, P> {
    fn drop(&mut self) {
        if let Err(err) = self.process.free(self.address) {
            warn!("failed to release remote region at {}: {}", self.address, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockRemote;
    use super::*;

    #[test]
    fn test_region_released_on_drop() {
        let remote = MockRemote::new();
        {
            let region = RemoteRegion::alloc(&remote, 23, Protection::ExecuteReadWrite).unwrap();
            assert!(!region.address().is_null());
            assert_eq!(region.size(), 23);
            assert_eq!(remote.alloc_count(), 1);
            assert_eq!(remote.free_count(), 0);
        }
        assert_eq!(remote.free_count(), 1);
        assert_eq!(remote.live_region_count(), 0);
    }

    #[test]
    fn test_typed_read_helpers() {
        let remote = MockRemote::new();
        remote.preload(Address::new(0x5330), &[0x63, 0x00, 0x00, 0x00]);
        remote.preload(Address::new(0x5334), &[0x1E]);

        assert_eq!(remote.read_u32(Address::new(0x5330)).unwrap(), 0x63);
        assert_eq!(remote.read_u8(Address::new(0x5334)).unwrap(), 0x1E);
    }
}
