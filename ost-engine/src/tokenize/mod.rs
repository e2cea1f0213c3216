//! Tokenization strategy: SentencePiece when available, whitespace otherwise

mod subword;
pub mod whitespace;

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;

pub use subword::{
    SHARED_SPM, SOURCE_SPM, SubwordModel, SubwordPaths, TARGET_SPM, load_subword_model,
};

/// Which tokenization a session ended up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizationMode {
    Subword,
    Whitespace,
}

/// Tokenization strategy, chosen once when a session is built.
pub enum Tokenization {
    /// Source-side encoder and target-side decoder
    Subword {
        source: Box<dyn SubwordModel>,
        target: Box<dyn SubwordModel>,
    },
    /// Split on blanks, join with a single space
    Whitespace,
}

impl fmt::Debug for Tokenization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subword { .. } => f.write_str("Tokenization::Subword"),
            Self::Whitespace => f.write_str("Tokenization::Whitespace"),
        }
    }
}

impl Tokenization {
    /// Pick the tokenization for `model_dir`, loading SentencePiece models from disk.
    pub fn from_model_dir(model_dir: &Path) -> Self {
        Self::from_model_dir_with(model_dir, load_subword_model)
    }

    /// Pick the tokenization for `model_dir` using a custom model loader.
    ///
    /// Any missing file or load error falls back to whitespace mode; this
    /// never fails.
    pub fn from_model_dir_with<F>(model_dir: &Path, load: F) -> Self
    where
        F: Fn(&Path) -> Result<Box<dyn SubwordModel>>,
    {
        let Some(paths) = SubwordPaths::resolve(model_dir) else {
            debug!(
                "No SentencePiece models in {:?}, using whitespace tokenization",
                model_dir
            );
            return Self::Whitespace;
        };

        let source = load(&paths.source);
        let target = load(&paths.target);
        match (source, target) {
            (Ok(source), Ok(target)) => {
                info!(
                    "SentencePiece tokenization: source={:?} target={:?}",
                    paths.source, paths.target
                );
                Self::Subword { source, target }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(
                    "Failed to load SentencePiece models from {:?}, using whitespace tokenization: {}",
                    model_dir,
                    crate::error::error_chain(&e)
                );
                Self::Whitespace
            }
        }
    }

    /// The active mode
    pub fn mode(&self) -> TokenizationMode {
        match self {
            Self::Subword { .. } => TokenizationMode::Subword,
            Self::Whitespace => TokenizationMode::Whitespace,
        }
    }

    /// Convert source text into the token sequence the engine expects
    pub fn encode(&self, text: &str) -> Result<Vec<String>> {
        match self {
            Self::Subword { source, .. } => source.encode(text),
            Self::Whitespace => Ok(whitespace::split_tokens(text)),
        }
    }

    /// Convert engine output tokens back into text
    pub fn decode(&self, tokens: &[String]) -> Result<String> {
        match self {
            Self::Subword { target, .. } => target.decode(tokens),
            Self::Whitespace => Ok(whitespace::join_tokens(tokens)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Subword model that tags pieces with the file it was loaded from
    struct TaggedModel {
        tag: String,
    }

    impl SubwordModel for TaggedModel {
        fn encode(&self, text: &str) -> Result<Vec<String>> {
            Ok(text
                .chars()
                .map(|c| format!("{}:{}", self.tag, c))
                .collect())
        }

        fn decode(&self, pieces: &[String]) -> Result<String> {
            Ok(format!("{}[{}]", self.tag, pieces.concat()))
        }
    }

    fn file_tag(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    fn tagged_loader(path: &Path) -> Result<Box<dyn SubwordModel>> {
        Ok(Box::new(TaggedModel {
            tag: file_tag(path),
        }))
    }

    #[test]
    fn test_whitespace_when_no_models() {
        let dir = TempDir::new().unwrap();
        let tok = Tokenization::from_model_dir_with(dir.path(), tagged_loader);
        assert_eq!(tok.mode(), TokenizationMode::Whitespace);
        assert_eq!(tok.encode("hello   world\n").unwrap(), vec!["hello", "world"]);
    }

    #[test]
    fn test_shared_model_used_for_both_sides() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SHARED_SPM), b"spm").unwrap();

        let loaded = Mutex::new(Vec::<PathBuf>::new());
        let tok = Tokenization::from_model_dir_with(dir.path(), |path| {
            loaded.lock().unwrap().push(path.to_path_buf());
            tagged_loader(path)
        });

        assert_eq!(tok.mode(), TokenizationMode::Subword);
        let loaded = loaded.into_inner().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|p| p.ends_with(SHARED_SPM)));
        assert_eq!(tok.encode("ab").unwrap(), vec!["spm.model:a", "spm.model:b"]);
        assert_eq!(
            tok.decode(&["x".to_string(), "y".to_string()]).unwrap(),
            "spm.model[xy]"
        );
    }

    #[test]
    fn test_source_encodes_target_decodes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SOURCE_SPM), b"spm").unwrap();
        fs::write(dir.path().join(TARGET_SPM), b"spm").unwrap();

        let tok = Tokenization::from_model_dir_with(dir.path(), tagged_loader);
        assert_eq!(tok.encode("a").unwrap(), vec!["source.spm:a"]);
        assert_eq!(tok.decode(&["z".to_string()]).unwrap(), "target.spm[z]");
    }

    #[test]
    fn test_load_failure_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SOURCE_SPM), b"spm").unwrap();
        fs::write(dir.path().join(TARGET_SPM), b"spm").unwrap();

        // Only the target side fails to load
        let tok = Tokenization::from_model_dir_with(dir.path(), |path| {
            if path.ends_with(TARGET_SPM) {
                Err(TranslateError::TokenizerLoad("corrupt model".into()))
            } else {
                tagged_loader(path)
            }
        });
        assert_eq!(tok.mode(), TokenizationMode::Whitespace);
    }

    #[test]
    fn test_whitespace_decode_joins() {
        let tok = Tokenization::Whitespace;
        let out = tok
            .decode(&["x".to_string(), "y".to_string(), "z".to_string()])
            .unwrap();
        assert_eq!(out, "x y z");
    }

    #[cfg(not(feature = "sentencepiece"))]
    #[test]
    fn test_default_loader_falls_back_without_feature() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SHARED_SPM), b"spm").unwrap();
        let tok = Tokenization::from_model_dir(dir.path());
        assert_eq!(tok.mode(), TokenizationMode::Whitespace);
    }
}
