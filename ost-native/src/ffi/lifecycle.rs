#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ffi::{c_char, c_int};
use std::path::Path;
use std::ptr;

use ost_engine::TranslationSession;

use crate::config::Settings;

use super::buffer::write_error;
use super::error::CallError;
use super::registry::{self, NULL_HANDLE};
use super::{OST_ERROR, OST_OK, init_logging, read_c_str, run_guarded};

/// Create a translator for a CTranslate2 model directory.
///
/// On success writes a non-zero handle to `out_handle` and returns `OST_OK`.
/// On failure `out_handle` is set to 0, a message is written to `error_buf`,
/// and `OST_ERROR` is returned.
#[unsafe(no_mangle)]
pub extern "C" fn ost_translator_create(
    model_dir_utf8: *const c_char,
    out_handle: *mut u64,
    error_buf: *mut c_char,
    error_buf_len: c_int,
) -> c_int {
    if out_handle.is_null() {
        write_error(error_buf, error_buf_len, "out_handle is null");
        return OST_ERROR;
    }
    // SAFETY: out_handle is non-null (checked above) and points to caller-owned storage
    unsafe { *out_handle = NULL_HANDLE };

    run_guarded("ost_translator_create", error_buf, error_buf_len, || {
        let model_dir = read_c_str(model_dir_utf8)
            .filter(|dir| !dir.is_empty())
            .ok_or(CallError::InvalidArgument("model_dir is empty"))?;
        let model_dir = Path::new(&model_dir);

        let settings = Settings::load_for_model_dir(model_dir);
        init_logging(&settings.logging.filter);
        tracing::info!(
            "ost_translator_create: model_dir={:?} engine={:?}",
            model_dir,
            settings.engine
        );

        let session = TranslationSession::open_with_options(model_dir, &settings.engine)?;
        let handle = registry::register(session);
        // SAFETY: checked non-null above
        unsafe { *out_handle = handle };
        tracing::debug!("Translator created: handle={}", handle);
        Ok(())
    })
}

/// Destroy a translator. Passing 0 is a no-op.
///
/// Returns `OST_ERROR` for a handle that is not (or no longer) open.
#[unsafe(no_mangle)]
pub extern "C" fn ost_translator_destroy(handle: u64) -> c_int {
    if handle == NULL_HANDLE {
        return OST_OK;
    }
    run_guarded("ost_translator_destroy", ptr::null_mut(), 0, || {
        let session = registry::remove(handle).ok_or(CallError::UnknownHandle(handle))?;
        drop(session);
        tracing::debug!("Translator destroyed: handle={}", handle);
        Ok(())
    })
}
