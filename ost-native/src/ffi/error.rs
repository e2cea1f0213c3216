//! Boundary errors and their status codes

use std::ffi::c_int;

use ost_engine::{TranslateError, error_chain};

use super::{OST_BUFFER_TOO_SMALL, OST_ERROR};

/// Everything a boundary call can fail with.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CallError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("unknown handle {0}")]
    UnknownHandle(u64),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error("output buffer too small: {required} bytes required")]
    BufferTooSmall { required: c_int },

    #[error("output of {0} bytes does not fit in a C int")]
    OutputTooLarge(usize),

    #[error("unexpected panic in {call}: {payload}")]
    Panic { call: &'static str, payload: String },
}

impl CallError {
    /// Status code reported to the host
    pub(crate) fn status(&self) -> c_int {
        match self {
            Self::BufferTooSmall { .. } => OST_BUFFER_TOO_SMALL,
            _ => OST_ERROR,
        }
    }

    /// Message written to the error buffer, including source errors
    pub(crate) fn message(&self) -> String {
        error_chain(self)
    }
}
