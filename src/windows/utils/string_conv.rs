//! String conversion helpers for Win32 structures

/// Converts a NUL-terminated ANSI char array (as found in ToolHelp32 entry
/// structs) to a String
pub fn entry_name_to_string(chars: &[i8]) -> String {
    let bytes: Vec<u8> = chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
