//! Translation session: one engine, one tokenization strategy

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::engine::{TranslationEngine, load_engine};
use crate::error::{Result, TranslateError};
use crate::options::EngineOptions;
use crate::tokenize::{Tokenization, TokenizationMode};
use crate::{EOS_TOKEN, PAD_TOKEN};

/// Append an EOS marker unless the sequence is empty or already ends with one.
///
/// Marian/OPUS-MT style models expect an explicit terminator and degrade
/// silently without it.
pub fn append_eos(tokens: &mut Vec<String>) {
    if tokens.last().is_some_and(|last| last != EOS_TOKEN) {
        tokens.push(EOS_TOKEN.to_string());
    }
}

/// Remove every EOS and padding marker, wherever it occurs.
pub fn strip_special_tokens(tokens: &mut Vec<String>) {
    tokens.retain(|t| t != EOS_TOKEN && t != PAD_TOKEN);
}

/// One loaded translator bound to a model directory.
///
/// `translate` may be called from several threads. Tokenization runs
/// concurrently; the engine call itself is serialized by `engine`'s lock.
pub struct TranslationSession {
    model_dir: PathBuf,
    engine: Mutex<Box<dyn TranslationEngine>>,
    tokenization: Tokenization,
}

impl TranslationSession {
    /// Open a session on `model_dir` with default engine options.
    pub fn open(model_dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(model_dir, &EngineOptions::default())
    }

    /// Open a session on `model_dir`.
    ///
    /// Fails if the path is empty or the engine cannot load the model.
    /// Missing or broken SentencePiece models only downgrade tokenization.
    pub fn open_with_options(
        model_dir: impl AsRef<Path>,
        options: &EngineOptions,
    ) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        if model_dir.as_os_str().is_empty() {
            return Err(TranslateError::EmptyModelDir);
        }

        let engine = load_engine(model_dir, options)?;
        let tokenization = Tokenization::from_model_dir(model_dir);
        info!(
            "Translation session opened: {:?} (tokenization={:?})",
            model_dir,
            tokenization.mode()
        );

        Ok(Self::from_parts(model_dir, engine, tokenization))
    }

    /// Assemble a session from an already loaded engine and tokenization.
    pub fn from_parts(
        model_dir: impl Into<PathBuf>,
        engine: Box<dyn TranslationEngine>,
        tokenization: Tokenization,
    ) -> Self {
        Self {
            model_dir: model_dir.into(),
            engine: Mutex::new(engine),
            tokenization,
        }
    }

    /// Model directory this session was opened on
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Tokenization chosen at construction
    pub fn tokenization_mode(&self) -> TokenizationMode {
        self.tokenization.mode()
    }

    /// Translate `input` end to end.
    ///
    /// Returns an empty string when the engine produces no result.
    pub fn translate(&self, input: &str) -> Result<String> {
        let mut tokens = self.tokenization.encode(input)?;
        append_eos(&mut tokens);
        debug!("Source tokens: {:?}", tokens);

        let results = {
            // A panic inside a previous engine call must not brick the session
            let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
            engine.translate_batch(std::slice::from_ref(&tokens))?
        };

        let Some(mut output) = results.into_iter().next() else {
            return Ok(String::new());
        };
        strip_special_tokens(&mut output);
        debug!("Target tokens: {:?}", output);

        self.tokenization.decode(&output)
    }
}

impl Drop for TranslationSession {
    fn drop(&mut self) {
        info!("Translation session closed: {:?}", self.model_dir);
    }
}
