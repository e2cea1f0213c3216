//! ost-native: C ABI for offline neural machine translation
//!
//! This crate exposes ost-engine translation sessions to a managed host
//! through flat `extern "C"` functions, opaque integer handles and
//! caller-allocated UTF-8 buffers.

pub mod config;
pub mod ffi;

pub use config::Settings;
pub use ffi::{NULL_HANDLE, OST_BUFFER_TOO_SMALL, OST_ERROR, OST_OK};
