//! C FFI interface for managed hosts
//!
//! Every exported function returns a status code and never lets a panic
//! unwind into the caller. Strings travel as null-terminated UTF-8 in, and
//! as bytes copied into caller-owned buffers out.

use std::ffi::{CStr, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

mod buffer;
mod error;
mod lifecycle;
mod query;
mod registry;
mod translate;


pub use lifecycle::{ost_translator_create, ost_translator_destroy};
pub use query::ost_translator_tokenization_mode;
pub use registry::NULL_HANDLE;
pub use translate::ost_translator_translate_utf8;

use buffer::write_error;
use error::CallError;

/// Call succeeded
pub const OST_OK: c_int = 0;
/// Call failed; a message was written to the error buffer
pub const OST_ERROR: c_int = 1;
/// Output buffer shorter than the required length; nothing was copied
pub const OST_BUFFER_TOO_SMALL: c_int = 2;

static INIT_LOGGING: Once = Once::new();

fn init_logging(default_filter: &str) {
    INIT_LOGGING.call_once(|| {
        // try_init: the host may already have installed a global subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
            )
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Read a null-terminated string, replacing invalid UTF-8. Returns `None` if null.
fn read_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: non-null (checked above); the caller guarantees a null-terminated string
    let s = unsafe { CStr::from_ptr(ptr) };
    Some(s.to_string_lossy().into_owned())
}

/// Extract a readable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run one boundary call: catch panics, map the outcome to a status code and
/// write any error message to the caller's error buffer.
fn run_guarded<F>(call: &'static str, error_buf: *mut c_char, error_buf_len: c_int, f: F) -> c_int
where
    F: FnOnce() -> Result<(), CallError>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(CallError::Panic {
            call,
            payload: panic_message(payload.as_ref()),
        })
    });

    match outcome {
        Ok(()) => OST_OK,
        Err(err) => {
            let status = err.status();
            let message = err.message();
            if status == OST_ERROR {
                tracing::error!("{}: {}", call, message);
            } else {
                tracing::debug!("{}: {}", call, message);
            }
            write_error(error_buf, error_buf_len, &message);
            status
        }
    }
}
