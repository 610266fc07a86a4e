//! Built-in memory layout for the known winmine.exe build
//!
//! Every value here is a contract with one specific binary version; nothing
//! is discovered at runtime.

use super::loader::{Config, InjectionConfig, LayoutConfig, TargetConfig};

/// Executable name the process list is searched for
pub const PROCESS_NAME: &str = "winmine.exe";
/// Module whose base address anchors all offsets
pub const MODULE_NAME: &str = "winmine.exe";

/// Offset of the routine that toggles the flag on a tile
pub const FLAG_TILE_FUNCTION_OFFSET: usize = 0x374F;
/// Offset of the total number of mines in the current game
pub const MINE_COUNT_OFFSET: usize = 0x5330;
/// Offset of the minefield width byte
pub const WIDTH_OFFSET: usize = 0x5334;
/// Offset of the minefield height byte
pub const HEIGHT_OFFSET: usize = 0x5338;
/// Offset of the mines-left-to-find counter
pub const MINES_REMAINING_OFFSET: usize = 0x5194;
/// Offset of the start of the minefield block
pub const MINEFIELD_OFFSET: usize = 0x5340;
/// Size of the minefield block in memory
pub const MINEFIELD_SIZE: usize = 0x35F;

/// How long to wait for an injected thread before giving up on the join
pub const THREAD_JOIN_TIMEOUT_MS: u64 = 1000;

/// Returns the configuration for the known winmine.exe build
pub fn default_config() -> Config {
    Config {
        target: TargetConfig {
            process_name: PROCESS_NAME.to_string(),
            module_name: MODULE_NAME.to_string(),
        },
        layout: LayoutConfig {
            mine_count_offset: MINE_COUNT_OFFSET,
            width_offset: WIDTH_OFFSET,
            height_offset: HEIGHT_OFFSET,
            mines_remaining_offset: MINES_REMAINING_OFFSET,
            minefield_offset: MINEFIELD_OFFSET,
            minefield_size: MINEFIELD_SIZE,
        },
        injection: InjectionConfig {
            flag_tile_fn_offset: FLAG_TILE_FUNCTION_OFFSET,
            thread_join_timeout_ms: THREAD_JOIN_TIMEOUT_MS,
        },
    }
}
