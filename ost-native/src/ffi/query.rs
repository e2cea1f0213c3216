use std::ffi::c_int;

use ost_engine::TokenizationMode;

use super::registry;

/// Report which tokenization a translator uses.
///
/// Returns 1 for SentencePiece, 0 for the whitespace fallback, -1 for an
/// unknown handle.
#[unsafe(no_mangle)]
pub extern "C" fn ost_translator_tokenization_mode(handle: u64) -> c_int {
    match registry::lookup(handle).map(|session| session.tokenization_mode()) {
        Some(TokenizationMode::Subword) => 1,
        Some(TokenizationMode::Whitespace) => 0,
        None => -1,
    }
}
