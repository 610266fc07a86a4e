//! Mine flagging orchestration over a decoded snapshot
//!
//! The scan/act split is generic: [`apply_to_matching`] walks the grid
//! row-major and refuses to act at all once a terminal cell is seen. The
//! minesweeper-specific rules (skip already-flagged mines, normalize
//! question-marked ones before toggling) live in [`MineFlagger`] as a
//! consumer policy, not in the scan itself.

use std::time::Duration;

use tracing::{debug, info};

use crate::core::types::{Address, MemoryResult};
use crate::field::cell::PLAIN_MINE;
use crate::field::{CellState, FieldSnapshot, MineLocation};
use crate::inject::{CodeInjector, RemoteCallStub};
use crate::memory::RemoteProcess;

/// Result of a scan-and-apply pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A terminal cell was seen; no match was processed
    Aborted,
    /// Number of matches the action reported as acted on
    Applied(usize),
}

/// Scans the snapshot row-major and runs `action` for every cell matching
/// `matches`. If any cell satisfies `is_terminal`, the whole pass aborts
/// before processing a single match. An action error aborts the remaining
/// matches.
pub fn apply_to_matching<T, M, A>(
    snapshot: &FieldSnapshot,
    is_terminal: T,
    matches: M,
    mut action: A,
) -> MemoryResult<ApplyOutcome>
where
    T: Fn(CellState) -> bool,
    M: Fn(CellState) -> bool,
    A: FnMut(MineLocation, CellState) -> MemoryResult<bool>,
{
    let mut found = Vec::new();
    for (location, state) in snapshot.cells() {
        if is_terminal(state) {
            return Ok(ApplyOutcome::Aborted);
        }
        if matches(state) {
            found.push((location, state));
        }
    }

    let mut applied = 0;
    for (location, state) in found {
        if action(location, state)? {
            applied += 1;
        }
    }
    Ok(ApplyOutcome::Applied(applied))
}

/// Outcome of a flag-all-mines action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    /// An exploded mine was found; the game is already over
    GameOver,
    /// Number of mines a flag call was issued for
    Flagged(usize),
}

/// Drives the flag-toggle routine in the target once per unflagged mine
pub struct MineFlagger<'p, P: RemoteProcess + ?Sized> {
    /// Accessor for the target process
    pub process: &'p P,
    /// Address of the minefield block in the target
    pub minefield_address: Address,
    /// Address of the flag-toggle routine in the target
    pub flag_fn_address: Address,
    /// Bound on each remote thread join
    pub timeout: Duration,
}

impl<P: RemoteProcess + ?Sized> MineFlagger<'_, P> {
    /// Flags every unflagged mine in the snapshot.
    ///
    /// The target routine only toggles state, so a question-marked mine is
    /// first rewritten to a plain mine in process memory; invoking the
    /// toggle on it directly would produce the wrong transition. Cells
    /// already flagged are left alone.
    pub fn flag_all(
        &self,
        snapshot: &FieldSnapshot,
        stub: &dyn RemoteCallStub,
    ) -> MemoryResult<FlagOutcome> {
        let injector = CodeInjector::new(self.process, self.timeout);
        // Staged on first use; a lost game or an all-flagged board never
        // allocates in the target.
        let mut call = None;

        let outcome = apply_to_matching(
            snapshot,
            |state| state.is_exploded(),
            |state| state.is_mine(),
            |location, state| {
                match state {
                    CellState::MineWithFlag => {
                        debug!("mine at ({}, {}) is already flagged", location.x, location.y);
                        return Ok(false);
                    }
                    CellState::MineWithQuestionMark => {
                        let address = self.minefield_address.add(location.field_offset());
                        self.process.write_bytes(address, &[PLAIN_MINE])?;
                    }
                    _ => {}
                }

                if call.is_none() {
                    call = Some(injector.prepare(stub, self.flag_fn_address)?);
                }
                if let Some(prepared) = call.as_ref() {
                    prepared.invoke(location.x as i32, location.y as i32)?;
                }
                Ok(true)
            },
        )?;

        match outcome {
            ApplyOutcome::Aborted => {
                info!("found an exploded mine, the game is already over");
                Ok(FlagOutcome::GameOver)
            }
            ApplyOutcome::Applied(count) => Ok(FlagOutcome::Flagged(count)),
        }
    }
}
