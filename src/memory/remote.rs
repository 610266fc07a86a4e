//! Windows implementation of [`RemoteProcess`] backed by a [`ProcessHandle`]

use std::time::Duration;

use winapi::um::winnt::{PAGE_EXECUTE_READWRITE, PAGE_READWRITE};

use crate::core::types::{Address, MemoryError, MemoryResult};
use crate::process::ProcessHandle;
use crate::windows::bindings::kernel32;

use super::{JoinOutcome, Protection, RemoteProcess};

impl Protection {
    fn as_page_flags(self) -> u32 {
        match self {
            Protection::ReadWrite => PAGE_READWRITE,
            Protection::ExecuteReadWrite => PAGE_EXECUTE_READWRITE,
        }
    }
}

impl RemoteProcess for ProcessHandle {
    fn read_bytes(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<()> {
        let transferred = self.read_memory(address.as_usize(), buffer)?;
        // A short transfer is the same failure class as a hard fault
        if transferred != buffer.len() {
            return Err(MemoryError::read_failed(
                address,
                format!(
                    "partial read: expected {} bytes, got {}",
                    buffer.len(),
                    transferred
                ),
            ));
        }
        Ok(())
    }

    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let transferred = self.write_memory(address.as_usize(), data)?;
        if transferred != data.len() {
            return Err(MemoryError::write_failed(
                address,
                format!(
                    "partial write: expected {} bytes, wrote {}",
                    data.len(),
                    transferred
                ),
            ));
        }
        Ok(())
    }

    fn alloc(&self, size: usize, protection: Protection) -> MemoryResult<Address> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "Process handle is null".to_string(),
            ));
        }
        let address =
            unsafe { kernel32::virtual_alloc_ex(self.raw(), size, protection.as_page_flags())? };
        Ok(Address::new(address))
    }

    fn free(&self, address: Address) -> MemoryResult<()> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "Process handle is null".to_string(),
            ));
        }
        unsafe { kernel32::virtual_free_ex(self.raw(), address.as_usize()) }
    }

    fn spawn_and_wait(
        &self,
        entry: Address,
        arg: Address,
        timeout: Duration,
    ) -> MemoryResult<JoinOutcome> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "Process handle is null".to_string(),
            ));
        }

        // The thread handle closes when the guard drops, join or no join.
        let thread = crate::windows::types::Handle::new(unsafe {
            kernel32::create_remote_thread(self.raw(), entry.as_usize(), arg.as_usize())?
        });

        let timeout_ms = timeout.as_millis().min(u128::from(u32::MAX)) as u32;
        let completed = unsafe { kernel32::wait_for_single_object(thread.raw(), timeout_ms)? };
        Ok(if completed {
            JoinOutcome::Completed
        } else {
            JoinOutcome::TimedOut
        })
    }
}
