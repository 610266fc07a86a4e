//! Core type definitions for minefinder
//!
//! Fundamental types used throughout the tool: the address wrapper,
//! the error taxonomy, and id aliases.

mod address;
mod error;

// Re-export all public types
pub use address::Address;
pub use error::{MemoryError, MemoryResult};

// Common type aliases
pub type ProcessId = u32;
