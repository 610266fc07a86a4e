//! Safe HANDLE wrapper with automatic cleanup

use std::fmt;
use std::ptr;

use winapi::um::winnt::HANDLE;

use crate::windows::bindings::kernel32;

/// RAII wrapper around a Windows HANDLE. Used for process, thread and
/// snapshot handles alike; the handle is closed exactly once, when the
/// wrapper drops.
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Takes ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Creates a null handle that closes nothing
    pub fn null() -> Self {
        Handle {
            handle: ptr::null_mut(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// The raw handle, valid only while this wrapper is alive
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // Nothing useful to do about a close failure during cleanup
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("raw", &self.handle)
            .finish()
    }
}

// HANDLEs are process-local kernel object references
unsafe impl Send for Handle {}
