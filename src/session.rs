//! One attached target session
//!
//! Everything a menu action needs is acquired fresh here (pid, module base,
//! process handle) and released when the session drops at the end of the
//! action. Nothing is cached across actions: the target can restart at any
//! time and its base address with it.

use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::field::FieldSnapshot;
use crate::flagging::{FlagOutcome, MineFlagger};
use crate::inject::X86StdcallPairStub;
use crate::memory::RemoteProcess;
use crate::process::{find_module_base, find_process_id, ProcessHandle};

/// An open full-access view of the running target
pub struct Session {
    pid: ProcessId,
    module_base: Address,
    handle: ProcessHandle,
}

impl Session {
    /// Locates the target by name and opens a full-access handle
    pub fn attach(config: &Config) -> MemoryResult<Self> {
        let pid = find_process_id(&config.target.process_name)?;
        let module_base = find_module_base(pid, &config.target.module_name)?;
        let handle = ProcessHandle::open_all_access(pid)?;
        debug!(
            "attached to {} (pid {pid}, base {module_base})",
            config.target.process_name
        );
        Ok(Session {
            pid,
            module_base,
            handle,
        })
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn module_base(&self) -> Address {
        self.module_base
    }

    /// Reads the current game metadata and minefield block and decodes them.
    /// Always a fresh read; there is no incremental diffing.
    pub fn snapshot(&self, config: &Config) -> MemoryResult<FieldSnapshot> {
        let layout = &config.layout;

        let mine_count = self
            .handle
            .read_u32(self.module_base.add(layout.mine_count_offset))?;
        let width = self
            .handle
            .read_u8(self.module_base.add(layout.width_offset))?;
        let height = self
            .handle
            .read_u8(self.module_base.add(layout.height_offset))?;

        // The block read is fixed-size regardless of the logical dimensions
        let mut raw = vec![0u8; layout.minefield_size];
        self.handle
            .read_bytes(self.module_base.add(layout.minefield_offset), &mut raw)?;

        FieldSnapshot::decode(raw, width, height, mine_count)
    }

    /// Reads the game's mines-left-to-find counter
    pub fn mines_remaining(&self, config: &Config) -> MemoryResult<u32> {
        self.handle
            .read_u32(self.module_base.add(config.layout.mines_remaining_offset))
    }

    /// Flags every unflagged mine in the given snapshot
    pub fn flag_all_mines(
        &self,
        config: &Config,
        snapshot: &FieldSnapshot,
    ) -> MemoryResult<FlagOutcome> {
        let flagger = MineFlagger {
            process: &self.handle,
            minefield_address: self.module_base.add(config.layout.minefield_offset),
            flag_fn_address: self.module_base.add(config.injection.flag_tile_fn_offset),
            timeout: Duration::from_millis(config.injection.thread_join_timeout_ms),
        };
        flagger.flag_all(snapshot, &X86StdcallPairStub)
    }
}
