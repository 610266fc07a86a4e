//! Kernel32.dll bindings for process, memory and thread operations

use std::{mem, ptr};

use winapi::shared::minwindef::{DWORD, FALSE, LPVOID};
use winapi::shared::winerror::WAIT_TIMEOUT;
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::{ReadProcessMemory, VirtualAllocEx, VirtualFreeEx, WriteProcessMemory};
use winapi::um::processthreadsapi::{CreateRemoteThread, OpenProcess};
use winapi::um::synchapi::WaitForSingleObject;
use winapi::um::winbase::WAIT_OBJECT_0;
use winapi::um::winnt::{HANDLE, MEM_COMMIT, MEM_RELEASE, MEM_RESERVE};

use crate::core::types::{MemoryError, MemoryResult};

/// Last-error text including the OS error code, for failure reasons
fn last_error_string() -> String {
    windows::core::Error::from_win32().to_string()
}

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> MemoryResult<HANDLE> {
    unsafe {
        let handle = OpenProcess(desired_access, FALSE, pid);
        if handle.is_null() {
            Err(MemoryError::access_denied(pid, last_error_string()))
        } else {
            Ok(handle)
        }
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(MemoryError::WindowsApi(format!(
            "Failed to close handle: {}",
            last_error_string()
        )))
    } else {
        Ok(())
    }
}

/// Safe wrapper for ReadProcessMemory. Returns the number of bytes read.
///
/// # Safety
/// The handle must be a valid process handle with appropriate access rights
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: usize,
    buffer: &mut [u8],
) -> MemoryResult<usize> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address as LPVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result == FALSE {
        Err(MemoryError::read_failed(
            format!("0x{:X}", address),
            last_error_string(),
        ))
    } else {
        Ok(bytes_read)
    }
}

/// Safe wrapper for WriteProcessMemory. Returns the number of bytes written.
///
/// # Safety
/// The handle must be a valid process handle with appropriate access rights
pub unsafe fn write_process_memory(
    handle: HANDLE,
    address: usize,
    data: &[u8],
) -> MemoryResult<usize> {
    let mut bytes_written = 0;

    let result = WriteProcessMemory(
        handle,
        address as LPVOID,
        data.as_ptr() as LPVOID,
        data.len(),
        &mut bytes_written,
    );

    if result == FALSE {
        Err(MemoryError::write_failed(
            format!("0x{:X}", address),
            last_error_string(),
        ))
    } else {
        Ok(bytes_written)
    }
}

/// Safe wrapper for VirtualAllocEx: commits a fresh region in the target
///
/// # Safety
/// The handle must be a valid process handle with PROCESS_VM_OPERATION
pub unsafe fn virtual_alloc_ex(
    handle: HANDLE,
    size: usize,
    protection: DWORD,
) -> MemoryResult<usize> {
    let address = VirtualAllocEx(
        handle,
        ptr::null_mut(),
        size,
        MEM_COMMIT | MEM_RESERVE,
        protection,
    );

    if address.is_null() {
        Err(MemoryError::allocation_failed(size, last_error_string()))
    } else {
        Ok(address as usize)
    }
}

/// Safe wrapper for VirtualFreeEx
///
/// # Safety
/// The address must come from `virtual_alloc_ex` on the same process
pub unsafe fn virtual_free_ex(handle: HANDLE, address: usize) -> MemoryResult<()> {
    // MEM_RELEASE requires a zero size and frees the whole reservation
    if VirtualFreeEx(handle, address as LPVOID, 0, MEM_RELEASE) == FALSE {
        Err(MemoryError::WindowsApi(format!(
            "Failed to free remote region at 0x{:X}: {}",
            address,
            last_error_string()
        )))
    } else {
        Ok(())
    }
}

/// Safe wrapper for CreateRemoteThread: starts `entry` in the target with
/// `parameter` as the thread argument. Returns the thread handle.
///
/// # Safety
/// `entry` must point at executable code in the target laid out for the
/// thread-start calling convention
pub unsafe fn create_remote_thread(
    handle: HANDLE,
    entry: usize,
    parameter: usize,
) -> MemoryResult<HANDLE> {
    let start: unsafe extern "system" fn(LPVOID) -> DWORD = mem::transmute(entry);
    let thread = CreateRemoteThread(
        handle,
        ptr::null_mut(),
        0,
        Some(start),
        parameter as LPVOID,
        0,
        ptr::null_mut(),
    );

    if thread.is_null() {
        Err(MemoryError::launch_failed(
            format!("0x{:X}", entry),
            last_error_string(),
        ))
    } else {
        Ok(thread)
    }
}

/// Safe wrapper for WaitForSingleObject. Returns true when the object was
/// signalled and false on timeout.
///
/// # Safety
/// The handle must be a valid waitable handle
pub unsafe fn wait_for_single_object(handle: HANDLE, timeout_ms: u32) -> MemoryResult<bool> {
    match WaitForSingleObject(handle, timeout_ms) {
        WAIT_OBJECT_0 => Ok(true),
        WAIT_TIMEOUT => Ok(false),
        _ => Err(MemoryError::WindowsApi(format!(
            "WaitForSingleObject failed: {}",
            last_error_string()
        ))),
    }
}
