//! Counting fake remote process for exercising the injection machinery
//!
//! Backs the resource-symmetry and orchestration tests: every allocation,
//! release, write and thread launch is recorded, and individual operations
//! can be made to fail on their nth call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::core::types::{Address, MemoryError, MemoryResult};

use super::{JoinOutcome, Protection, RemoteProcess};

#[derive(Default)]
struct MockState {
    bytes: HashMap<usize, u8>,
    live_regions: HashMap<usize, usize>,
    next_base: usize,
    alloc_calls: usize,
    free_calls: usize,
    write_calls: usize,
    launch_calls: usize,
    writes: Vec<(usize, Vec<u8>)>,
    /// (entry, arg, copy of the argument record at launch time)
    launches: Vec<(usize, usize, Vec<u8>)>,
    fail_alloc_at: Option<usize>,
    fail_write_at: Option<usize>,
    fail_launch_at: Option<usize>,
    time_out_joins: bool,
}

/// In-memory stand-in for a target process
pub struct MockRemote {
    state: RefCell<MockState>,
}

impl MockRemote {
    pub fn new() -> Self {
        MockRemote {
            state: RefCell::new(MockState {
                next_base: 0x0010_0000,
                ..MockState::default()
            }),
        }
    }

    /// Makes the nth allocation (1-based) fail
    pub fn fail_alloc_at(&self, n: usize) {
        self.state.borrow_mut().fail_alloc_at = Some(n);
    }

    /// Makes the nth write (1-based) fail
    pub fn fail_write_at(&self, n: usize) {
        self.state.borrow_mut().fail_write_at = Some(n);
    }

    /// Makes the nth thread launch (1-based) fail
    pub fn fail_launch_at(&self, n: usize) {
        self.state.borrow_mut().fail_launch_at = Some(n);
    }

    /// Makes every join report a timeout instead of completion
    pub fn time_out_joins(&self) {
        self.state.borrow_mut().time_out_joins = true;
    }

    /// Seeds bytes at an address for subsequent reads
    pub fn preload(&self, address: Address, data: &[u8]) {
        let mut state = self.state.borrow_mut();
        for (i, &byte) in data.iter().enumerate() {
            state.bytes.insert(address.as_usize() + i, byte);
        }
    }

    pub fn alloc_count(&self) -> usize {
        self.state.borrow().alloc_calls
    }

    pub fn free_count(&self) -> usize {
        self.state.borrow().free_calls
    }

    pub fn launch_count(&self) -> usize {
        self.state.borrow().launch_calls
    }

    pub fn live_region_count(&self) -> usize {
        self.state.borrow().live_regions.len()
    }

    /// Every successful write as (address, data)
    pub fn writes(&self) -> Vec<(usize, Vec<u8>)> {
        self.state.borrow().writes.clone()
    }

    /// Every successful launch as (entry, arg, argument record bytes)
    pub fn launches(&self) -> Vec<(usize, usize, Vec<u8>)> {
        self.state.borrow().launches.clone()
    }

    fn bytes_at(state: &MockState, address: usize, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| state.bytes.get(&(address + i)).copied().unwrap_or(0))
            .collect()
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteProcess for MockRemote {
    fn read_bytes(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<()> {
        let state = self.state.borrow();
        let bytes = Self::bytes_at(&state, address.as_usize(), buffer.len());
        buffer.copy_from_slice(&bytes);
        Ok(())
    }

    fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        let mut state = self.state.borrow_mut();
        state.write_calls += 1;
        if state.fail_write_at == Some(state.write_calls) {
            return Err(MemoryError::write_failed(address, "mock write failure"));
        }
        for (i, &byte) in data.iter().enumerate() {
            state.bytes.insert(address.as_usize() + i, byte);
        }
        state.writes.push((address.as_usize(), data.to_vec()));
        Ok(())
    }

    fn alloc(&self, size: usize, _protection: Protection) -> MemoryResult<Address> {
        let mut state = self.state.borrow_mut();
        state.alloc_calls += 1;
        if state.fail_alloc_at == Some(state.alloc_calls) {
            return Err(MemoryError::allocation_failed(size, "mock allocation failure"));
        }
        let base = state.next_base;
        state.next_base += 0x1000;
        state.live_regions.insert(base, size);
        Ok(Address::new(base))
    }

    fn free(&self, address: Address) -> MemoryResult<()> {
        let mut state = self.state.borrow_mut();
        state.free_calls += 1;
        state.live_regions.remove(&address.as_usize());
        Ok(())
    }

    fn spawn_and_wait(
        &self,
        entry: Address,
        arg: Address,
        _timeout: Duration,
    ) -> MemoryResult<JoinOutcome> {
        let mut state = self.state.borrow_mut();
        state.launch_calls += 1;
        if state.fail_launch_at == Some(state.launch_calls) {
            return Err(MemoryError::launch_failed(entry, "mock launch failure"));
        }
        let record = Self::bytes_at(&state, arg.as_usize(), 8);
        state
            .launches
            .push((entry.as_usize(), arg.as_usize(), record));
        if state.time_out_joins {
            Ok(JoinOutcome::TimedOut)
        } else {
            Ok(JoinOutcome::Completed)
        }
    }
}
