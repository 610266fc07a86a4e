//! Target process discovery and handle management

pub mod handle;
pub mod locator;

pub use handle::ProcessHandle;
pub use locator::{find_module_base, find_process_id};
