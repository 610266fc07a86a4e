//! Windows API layer: raw bindings, RAII handle types and conversions

pub mod bindings;
pub mod types;
pub mod utils;
