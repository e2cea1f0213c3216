//! SentencePiece model discovery and loading

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TranslateError};

/// Source-side SentencePiece model file name
pub const SOURCE_SPM: &str = "source.spm";
/// Target-side SentencePiece model file name
pub const TARGET_SPM: &str = "target.spm";
/// Model shared by both sides, used when a side-specific file is absent
pub const SHARED_SPM: &str = "spm.model";

/// A loaded subword model.
///
/// Implementations must be reentrant: encode/decode run outside the
/// session's engine lock and may be called from several threads at once.
pub trait SubwordModel: Send + Sync {
    /// Encode text into subword pieces
    fn encode(&self, text: &str) -> Result<Vec<String>>;

    /// Decode subword pieces back into text
    fn decode(&self, pieces: &[String]) -> Result<String>;
}

/// Resolved source/target SentencePiece files for a model directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubwordPaths {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl SubwordPaths {
    /// Locate the SentencePiece files in `model_dir`.
    ///
    /// `source.spm` and `target.spm` are each replaced by `spm.model` when
    /// missing. Returns `None` unless both sides resolve to an existing file.
    pub fn resolve(model_dir: &Path) -> Option<Self> {
        let shared = model_dir.join(SHARED_SPM);
        let has_shared = shared.is_file();

        let pick = |name: &str| {
            let candidate = model_dir.join(name);
            if !candidate.is_file() && has_shared {
                shared.clone()
            } else {
                candidate
            }
        };
        let source = pick(SOURCE_SPM);
        let target = pick(TARGET_SPM);

        debug!("SentencePiece candidates: source={:?} target={:?}", source, target);

        if source.is_file() && target.is_file() {
            Some(Self { source, target })
        } else {
            None
        }
    }
}

/// Load a SentencePiece model from disk.
#[cfg(feature = "sentencepiece")]
pub fn load_subword_model(path: &Path) -> Result<Box<dyn SubwordModel>> {
    let processor = sentencepiece::SentencePieceProcessor::open(path)
        .map_err(|e| TranslateError::TokenizerLoad(e.into()))?;
    Ok(Box::new(processor))
}

/// Load a SentencePiece model from disk.
///
/// Always fails when built without the `sentencepiece` feature.
#[cfg(not(feature = "sentencepiece"))]
pub fn load_subword_model(path: &Path) -> Result<Box<dyn SubwordModel>> {
    Err(TranslateError::TokenizerLoad(
        format!("sentencepiece support not enabled, cannot load {:?}", path).into(),
    ))
}

#[cfg(feature = "sentencepiece")]
impl SubwordModel for sentencepiece::SentencePieceProcessor {
    fn encode(&self, text: &str) -> Result<Vec<String>> {
        let pieces = sentencepiece::SentencePieceProcessor::encode(self, text)
            .map_err(|e| TranslateError::Tokenize(e.into()))?;
        Ok(pieces.into_iter().map(|p| p.piece).collect())
    }

    fn decode(&self, pieces: &[String]) -> Result<String> {
        self.decode_pieces(pieces)
            .map_err(|e| TranslateError::Tokenize(e.into()))
    }
}
