//! Minefinder: a single-target process-memory inspection tool
//!
//! Locates a running `winmine.exe`, decodes the minefield out of its address
//! space, renders it for the operator, and can flag every mine by injecting
//! a small call stub and driving the game's own flag-toggle routine from a
//! remote thread. Offsets and the stub byte sequence are fixed constants
//! tied to one known binary version; see [`config`] for the layout contract.

pub mod config;
pub mod core;
pub mod field;
pub mod flagging;
pub mod inject;
pub mod memory;
#[cfg(windows)]
pub mod process;
#[cfg(windows)]
pub mod session;
#[cfg(windows)]
pub mod windows;

// Re-export the main types
pub use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
