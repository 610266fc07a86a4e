//! Error types for remote process operations

use std::fmt;
use thiserror::Error;

/// Main error type for operations against the target process
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Module {module} not found in process {pid}")]
    ModuleNotFound { module: String, pid: u32 },

    #[error("Failed to take a system snapshot: {0}")]
    SnapshotFailed(String),

    #[error("Access denied to process {pid}: {reason}")]
    AccessDenied { pid: u32, reason: String },

    #[error("Failed to read memory at {address}: {reason}")]
    ReadFailed { address: String, reason: String },

    #[error("Failed to write memory at {address}: {reason}")]
    WriteFailed { address: String, reason: String },

    #[error("Failed to allocate {size} bytes in the target process: {reason}")]
    AllocationFailed { size: usize, reason: String },

    #[error("Failed to launch remote thread at {entry}: {reason}")]
    LaunchFailed { entry: String, reason: String },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    WindowsApiError(#[from] windows::core::Error),

    #[error("Windows API: {0}")]
    WindowsApi(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a new Windows API error from the calling thread's last error code
    #[cfg(windows)]
    pub fn last_os_error() -> Self {
        MemoryError::WindowsApiError(windows::core::Error::from_win32())
    }

    /// Creates an access denied error for a process
    pub fn access_denied(pid: u32, reason: impl Into<String>) -> Self {
        MemoryError::AccessDenied {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a module not found error
    pub fn module_not_found(module: impl Into<String>, pid: u32) -> Self {
        MemoryError::ModuleNotFound {
            module: module.into(),
            pid,
        }
    }

    /// Creates a read failed error
    pub fn read_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::ReadFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a write failed error
    pub fn write_failed(address: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::WriteFailed {
            address: address.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates an allocation failed error
    pub fn allocation_failed(size: usize, reason: impl Into<String>) -> Self {
        MemoryError::AllocationFailed {
            size,
            reason: reason.into(),
        }
    }

    /// Creates a launch failed error
    pub fn launch_failed(entry: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::LaunchFailed {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a buffer too small error
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        MemoryError::BufferTooSmall { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemoryError::ProcessNotFound("winmine.exe".to_string());
        assert_eq!(err.to_string(), "Process not found: winmine.exe");

        let err = MemoryError::access_denied(1234, "OpenProcess failed");
        assert_eq!(
            err.to_string(),
            "Access denied to process 1234: OpenProcess failed"
        );

        let err = MemoryError::module_not_found("winmine.exe", 99);
        assert_eq!(err.to_string(), "Module winmine.exe not found in process 99");
    }

    #[test]
    fn test_operation_error_variants() {
        let errors: Vec<(MemoryError, &str)> = vec![
            (
                MemoryError::read_failed("0x5340", "page fault"),
                "Failed to read memory at 0x5340: page fault",
            ),
            (
                MemoryError::write_failed("0x2000", "write protected"),
                "Failed to write memory at 0x2000: write protected",
            ),
            (
                MemoryError::allocation_failed(23, "quota exceeded"),
                "Failed to allocate 23 bytes in the target process: quota exceeded",
            ),
            (
                MemoryError::launch_failed("0x3000", "thread creation denied"),
                "Failed to launch remote thread at 0x3000: thread creation denied",
            ),
            (
                MemoryError::SnapshotFailed("toolhelp unavailable".to_string()),
                "Failed to take a system snapshot: toolhelp unavailable",
            ),
            (
                MemoryError::buffer_too_small(863, 64),
                "Buffer too small: expected 863, got 64",
            ),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_helper_methods() {
        let err = MemoryError::read_failed("0xABCD", "invalid page");
        match err {
            MemoryError::ReadFailed { address, reason } => {
                assert_eq!(address, "0xABCD");
                assert_eq!(reason, "invalid page");
            }
            _ => panic!("Wrong error type"),
        }

        let err = MemoryError::launch_failed("0x1000", "denied");
        match err {
            MemoryError::LaunchFailed { entry, reason } => {
                assert_eq!(entry, "0x1000");
                assert_eq!(reason, "denied");
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_from_io_error() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "test");
        let mem_err: MemoryError = io_err.into();
        assert!(matches!(mem_err, MemoryError::IoError(_)));
    }

    #[test]
    fn test_memory_result_type() {
        fn failing_function() -> MemoryResult<u32> {
            Err(MemoryError::WindowsApi("test".to_string()))
        }

        assert!(failing_function().is_err());
    }
}
