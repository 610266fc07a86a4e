//! Target discovery via ToolHelp32 snapshots
//!
//! Both lookups compare names exactly (case-sensitive) and take the first
//! match; multiple processes or modules sharing a name are not
//! disambiguated.

use std::mem;

use tracing::debug;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Module32First, Module32Next, Process32First, Process32Next,
    MODULEENTRY32, PROCESSENTRY32, TH32CS_SNAPMODULE, TH32CS_SNAPMODULE32, TH32CS_SNAPPROCESS,
};

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::string_conv::entry_name_to_string;

fn take_snapshot(flags: u32, pid: ProcessId) -> MemoryResult<Handle> {
    let raw = unsafe { CreateToolhelp32Snapshot(flags, pid) };
    if raw == INVALID_HANDLE_VALUE {
        return Err(MemoryError::SnapshotFailed(
            windows::core::Error::from_win32().to_string(),
        ));
    }
    Ok(Handle::new(raw))
}

/// Resolves a process name to the id of the first matching process
pub fn find_process_id(process_name: &str) -> MemoryResult<ProcessId> {
    debug!("searching the process list for {process_name}");

    let snapshot = take_snapshot(TH32CS_SNAPPROCESS, 0)?;

    let mut entry: PROCESSENTRY32 = unsafe { mem::zeroed() };
    entry.dwSize = mem::size_of::<PROCESSENTRY32>() as u32;

    let mut more = unsafe { Process32First(snapshot.raw(), &mut entry) };
    while more != FALSE {
        if entry_name_to_string(&entry.szExeFile) == process_name {
            debug!("found {process_name} with pid {}", entry.th32ProcessID);
            return Ok(entry.th32ProcessID);
        }
        more = unsafe { Process32Next(snapshot.raw(), &mut entry) };
    }

    Err(MemoryError::ProcessNotFound(process_name.to_string()))
}

/// Resolves a module name to its base address in the given process.
/// Re-resolved every session; the base can change across target restarts.
pub fn find_module_base(pid: ProcessId, module_name: &str) -> MemoryResult<Address> {
    debug!("getting the base address of module {module_name} in process {pid}");

    let snapshot = take_snapshot(TH32CS_SNAPMODULE | TH32CS_SNAPMODULE32, pid)?;

    let mut entry: MODULEENTRY32 = unsafe { mem::zeroed() };
    entry.dwSize = mem::size_of::<MODULEENTRY32>() as u32;

    let mut more = unsafe { Module32First(snapshot.raw(), &mut entry) };
    while more != FALSE {
        if entry_name_to_string(&entry.szModule) == module_name {
            let base = Address::new(entry.modBaseAddr as usize);
            debug!("module base address is {base}");
            return Ok(base);
        }
        more = unsafe { Module32Next(snapshot.raw(), &mut entry) };
    }

    Err(MemoryError::module_not_found(module_name, pid))
}
