//! String conversion utilities for Windows API

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

/// Convert a fixed-size, null-terminated UTF-16 buffer to a Rust string
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    let os_string = OsString::from_wide(&wide[..len]);
    os_string.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_to_string() {
        let wide = vec![72, 101, 108, 108, 111, 0];
        assert_eq!(wide_to_string(&wide), "Hello");

        let no_null = vec![72, 101, 108, 108, 111];
        assert_eq!(wide_to_string(&no_null), "Hello");
    }

    #[test]
    fn test_fixed_buffer_with_trailing_garbage() {
        let mut buffer = [0u16; 16];
        for (slot, c) in buffer.iter_mut().zip("sekiro.exe".encode_utf16()) {
            *slot = c;
        }
        buffer[12] = 0x41;
        assert_eq!(wide_to_string(&buffer), "sekiro.exe");
    }
}
