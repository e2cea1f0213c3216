#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ffi::{c_char, c_int};

use super::buffer::copy_output;
use super::error::CallError;
use super::registry::{self, NULL_HANDLE};
use super::{read_c_str, run_guarded};

fn set_required_len(out_required_len: *mut c_int, len: c_int) {
    if !out_required_len.is_null() {
        // SAFETY: non-null (checked above) and points to caller-owned storage
        unsafe { *out_required_len = len };
    }
}

/// Translate a null-terminated UTF-8 string.
///
/// Two-phase protocol:
/// - `out_buf` null or `out_buf_len <= 0`: query mode. Only the required
///   byte length is written to `out_required_len`.
/// - `out_buf_len >= required`: the translation is copied into `out_buf`
///   (no terminator is appended) and `OST_OK` is returned.
/// - otherwise nothing is copied and `OST_BUFFER_TOO_SMALL` is returned
///   with the required length.
///
/// Each call translates from scratch; nothing is cached between the query
/// and the fill call.
#[unsafe(no_mangle)]
pub extern "C" fn ost_translator_translate_utf8(
    handle: u64,
    input_utf8: *const c_char,
    out_buf: *mut c_char,
    out_buf_len: c_int,
    out_required_len: *mut c_int,
    error_buf: *mut c_char,
    error_buf_len: c_int,
) -> c_int {
    set_required_len(out_required_len, 0);

    run_guarded("ost_translator_translate_utf8", error_buf, error_buf_len, || {
        if handle == NULL_HANDLE {
            return Err(CallError::InvalidArgument("handle is null"));
        }
        let input = read_c_str(input_utf8).ok_or(CallError::InvalidArgument("input is null"))?;
        let session = registry::lookup(handle).ok_or(CallError::UnknownHandle(handle))?;

        let output = session.translate(&input)?;
        let required =
            c_int::try_from(output.len()).map_err(|_| CallError::OutputTooLarge(output.len()))?;
        set_required_len(out_required_len, required);

        if out_buf.is_null() || out_buf_len <= 0 {
            return Ok(());
        }
        if out_buf_len < required {
            return Err(CallError::BufferTooSmall { required });
        }
        copy_output(out_buf, output.as_bytes());
        Ok(())
    })
}
