//! Copying into caller-owned buffers

use std::ffi::{c_char, c_int};
use std::ptr;

/// Write `msg` as a null-terminated string into the caller's error buffer.
///
/// Truncates on a UTF-8 character boundary to fit. A null or empty buffer
/// drops the message.
pub(crate) fn write_error(buf: *mut c_char, buf_len: c_int, msg: &str) {
    if buf.is_null() || buf_len <= 0 {
        return;
    }
    let capacity = buf_len as usize - 1;
    let mut n = msg.len().min(capacity);
    while !msg.is_char_boundary(n) {
        n -= 1;
    }
    // SAFETY: buf is non-null and the caller guarantees buf_len writable bytes; n < buf_len
    unsafe {
        ptr::copy_nonoverlapping(msg.as_ptr(), buf.cast::<u8>(), n);
        *buf.add(n) = 0;
    }
}

/// Copy `bytes` into the caller's output buffer without a terminator.
///
/// The caller has already checked that `buf` holds at least `bytes.len()` bytes.
pub(crate) fn copy_output(buf: *mut c_char, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    // SAFETY: buf is non-null with room for bytes.len() bytes (checked by the caller)
    unsafe {
        ptr::copy_nonoverlapping(bytes.as_ptr(), buf.cast::<u8>(), bytes.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(buf: &[c_char]) -> String {
        let bytes: Vec<u8> = buf.iter().take_while(|&&b| b != 0).map(|&b| b as u8).collect();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_write_error_fits() {
        let mut buf = [0x7f as c_char; 16];
        write_error(buf.as_mut_ptr(), buf.len() as c_int, "handle is null");
        assert_eq!(written(&buf), "handle is null");
    }

    #[test]
    fn test_write_error_truncates() {
        let mut buf = [0x7f as c_char; 5];
        write_error(buf.as_mut_ptr(), buf.len() as c_int, "handle is null");
        assert_eq!(written(&buf), "hand");
        assert_eq!(buf[4], 0);
    }

    #[test]
    fn test_write_error_truncates_on_char_boundary() {
        // "é" is two bytes; only one byte of room remains after "ab"
        let mut buf = [0x7f as c_char; 4];
        write_error(buf.as_mut_ptr(), buf.len() as c_int, "abé");
        assert_eq!(written(&buf), "ab");
    }

    #[test]
    fn test_write_error_single_byte_buffer() {
        let mut buf = [0x7f as c_char; 1];
        write_error(buf.as_mut_ptr(), 1, "anything");
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn test_write_error_null_or_empty_is_dropped() {
        write_error(ptr::null_mut(), 32, "dropped");
        let mut buf = [0x7f as c_char; 4];
        write_error(buf.as_mut_ptr(), 0, "dropped");
        write_error(buf.as_mut_ptr(), -1, "dropped");
        assert!(buf.iter().all(|&b| b == 0x7f));
    }

    #[test]
    fn test_copy_output() {
        let mut buf = [0 as c_char; 8];
        copy_output(buf.as_mut_ptr(), "héllo".as_bytes());
        let bytes: Vec<u8> = buf[..6].iter().map(|&b| b as u8).collect();
        assert_eq!(bytes, "héllo".as_bytes());
        assert_eq!(buf[6], 0);
    }
}
