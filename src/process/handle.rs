//! Safe process handle wrapper with RAII semantics

use std::fmt;

use winapi::um::winnt::{HANDLE, PROCESS_ALL_ACCESS};

use crate::core::types::{MemoryError, MemoryResult, ProcessId};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;

/// Owned handle to the target process. Injection needs the full set of
/// rights (read, write, memory operations, thread creation), so the handle
/// is always opened with all access; running elevated enough for that is an
/// external precondition.
pub struct ProcessHandle {
    handle: Handle,
    pid: ProcessId,
}

impl ProcessHandle {
    /// Opens the process with PROCESS_ALL_ACCESS
    pub fn open_all_access(pid: ProcessId) -> MemoryResult<Self> {
        let raw = kernel32::open_process(pid, PROCESS_ALL_ACCESS)?;
        Ok(ProcessHandle {
            handle: Handle::new(raw),
            pid,
        })
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid as long as this ProcessHandle exists
    pub unsafe fn raw(&self) -> HANDLE {
        self.handle.raw()
    }

    /// Check if the handle is valid
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    /// Read memory from the process, returning the byte count transferred
    pub fn read_memory(&self, address: usize, buffer: &mut [u8]) -> MemoryResult<usize> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "Process handle is null".to_string(),
            ));
        }
        unsafe { kernel32::read_process_memory(self.handle.raw(), address, buffer) }
    }

    /// Write memory to the process, returning the byte count transferred
    pub fn write_memory(&self, address: usize, data: &[u8]) -> MemoryResult<usize> {
        if !self.is_valid() {
            return Err(MemoryError::InvalidHandle(
                "Process handle is null".to_string(),
            ));
        }
        unsafe { kernel32::write_process_memory(self.handle.raw(), address, data) }
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_invalid_pid_fails() {
        let result = ProcessHandle::open_all_access(0);
        assert!(result.is_err());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_current_process() {
        let pid = std::process::id();
        let handle = ProcessHandle::open_all_access(pid).expect("open own process");
        assert_eq!(handle.pid(), pid);
        assert!(handle.is_valid());
    }

    #[test]
    fn test_invalid_handle_operations() {
        let handle = ProcessHandle {
            handle: Handle::null(),
            pid: 1234,
        };

        assert!(!handle.is_valid());

        let mut buffer = vec![0u8; 4];
        assert!(matches!(
            handle.read_memory(0x1000, &mut buffer),
            Err(MemoryError::InvalidHandle(_))
        ));
        assert!(matches!(
            handle.write_memory(0x1000, &[0u8; 4]),
            Err(MemoryError::InvalidHandle(_))
        ));
    }
}
