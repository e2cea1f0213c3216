//! Translation engine seam
//!
//! The session only needs "tokens in, best hypothesis tokens out". The
//! CTranslate2 backend lives behind the `ctranslate2` feature.

#[cfg(feature = "ctranslate2")]
mod ct2;

use std::path::Path;

use crate::error::Result;
#[cfg(not(feature = "ctranslate2"))]
use crate::error::TranslateError;
use crate::options::EngineOptions;

#[cfg(feature = "ctranslate2")]
pub use ct2::Ct2Engine;

/// A loaded sequence-to-sequence translator.
pub trait TranslationEngine: Send {
    /// Translate a batch of token sequences.
    ///
    /// Returns the best hypothesis for each input sequence, in order. An
    /// empty vector means the engine produced no result.
    fn translate_batch(&mut self, batch: &[Vec<String>]) -> Result<Vec<Vec<String>>>;
}

/// Load the compiled-in translation backend from `model_dir`.
#[cfg(feature = "ctranslate2")]
pub fn load_engine(
    model_dir: &Path,
    options: &EngineOptions,
) -> Result<Box<dyn TranslationEngine>> {
    Ok(Box::new(Ct2Engine::load(model_dir, options)?))
}

/// Load the compiled-in translation backend from `model_dir`.
///
/// Built without the `ctranslate2` feature there is no backend, so this
/// always fails.
#[cfg(not(feature = "ctranslate2"))]
pub fn load_engine(
    model_dir: &Path,
    options: &EngineOptions,
) -> Result<Box<dyn TranslationEngine>> {
    tracing::debug!(
        "Cannot load {:?} with {:?}: no translation backend compiled in",
        model_dir,
        options
    );
    Err(TranslateError::BackendUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "ctranslate2"))]
    #[test]
    fn test_load_without_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_engine(dir.path(), &EngineOptions::default());
        assert!(matches!(result, Err(TranslateError::BackendUnavailable)));
    }

    #[cfg(feature = "ctranslate2")]
    #[test]
    fn test_load_missing_model_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_engine(dir.path(), &EngineOptions::default());
        assert!(matches!(
            result,
            Err(crate::error::TranslateError::ModelLoad(_))
        ));
    }
}
