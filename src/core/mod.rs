//! Core module containing fundamental types for minefinder

pub mod types;

// Re-export commonly used types for convenience
pub use types::{Address, MemoryError, MemoryResult, ProcessId};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
