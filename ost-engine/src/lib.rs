//! ost-engine: translation sessions for offline neural machine translation
//!
//! A [`TranslationSession`] binds one CTranslate2 model directory to a
//! tokenization strategy (SentencePiece when the directory ships `.spm`
//! models, whitespace splitting otherwise) and serializes engine calls.

pub mod engine;
pub mod error;
pub mod options;
pub mod session;
pub mod tokenize;

pub use engine::TranslationEngine;
pub use error::{TranslateError, error_chain};
pub use options::{ComputeType, Device, EngineOptions};
pub use session::{TranslationSession, append_eos, strip_special_tokens};
pub use tokenize::{SubwordModel, SubwordPaths, Tokenization, TokenizationMode};

/// End-of-sequence marker expected by Marian/OPUS-MT style models
pub const EOS_TOKEN: &str = "</s>";
/// Padding marker emitted by the engine for batch alignment
pub const PAD_TOKEN: &str = "<pad>";
