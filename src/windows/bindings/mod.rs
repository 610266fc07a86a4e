//! Safe wrappers over the raw Win32 API surface

pub mod kernel32;
