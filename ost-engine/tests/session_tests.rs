//! Integration tests for translation sessions
//!
//! The engine and SentencePiece models are replaced by deterministic fakes,
//! so these run without any model files.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use ost_engine::tokenize::SHARED_SPM;
use ost_engine::{
    SubwordModel, Tokenization, TokenizationMode, TranslateError, TranslationEngine,
    TranslationSession,
};
use tempfile::TempDir;

// ============================================================================
// Fakes
// ============================================================================

/// Uppercases every token and reverses the order, keeping the EOS marker last
struct ReverseUpperEngine;

impl TranslationEngine for ReverseUpperEngine {
    fn translate_batch(
        &mut self,
        batch: &[Vec<String>],
    ) -> Result<Vec<Vec<String>>, TranslateError> {
        Ok(batch
            .iter()
            .map(|seq| {
                let mut out: Vec<String> = seq
                    .iter()
                    .filter(|t| *t != "</s>")
                    .rev()
                    .map(|t| t.to_uppercase())
                    .collect();
                out.push("</s>".to_string());
                out.push("<pad>".to_string());
                out
            })
            .collect())
    }
}

/// Character-level "SentencePiece": one piece per char, `▁` for spaces
struct CharPieces;

impl SubwordModel for CharPieces {
    fn encode(&self, text: &str) -> Result<Vec<String>, TranslateError> {
        Ok(text
            .chars()
            .map(|c| if c == ' ' { "▁".to_string() } else { c.to_string() })
            .collect())
    }

    fn decode(&self, pieces: &[String]) -> Result<String, TranslateError> {
        Ok(pieces.concat().replace('▁', " "))
    }
}

fn whitespace_session() -> TranslationSession {
    TranslationSession::from_parts("model", Box::new(ReverseUpperEngine), Tokenization::Whitespace)
}

fn subword_session(dir: &Path) -> TranslationSession {
    fs::write(dir.join(SHARED_SPM), b"spm").unwrap();
    let tokenization = Tokenization::from_model_dir_with(dir, |_| {
        Ok(Box::new(CharPieces) as Box<dyn SubwordModel>)
    });
    TranslationSession::from_parts(dir, Box::new(ReverseUpperEngine), tokenization)
}

// ============================================================================
// Whitespace mode
// ============================================================================

#[test]
fn test_whitespace_translation() {
    let session = whitespace_session();
    assert_eq!(session.tokenization_mode(), TokenizationMode::Whitespace);
    assert_eq!(session.translate("hello   world\n").unwrap(), "WORLD HELLO");
}

#[test]
fn test_translation_is_deterministic() {
    let session = whitespace_session();
    let first = session.translate("one two three").unwrap();
    for _ in 0..5 {
        assert_eq!(session.translate("one two three").unwrap(), first);
    }
}

#[test]
fn test_blank_input_translates_to_empty() {
    let session = whitespace_session();
    assert_eq!(session.translate("").unwrap(), "");
    assert_eq!(session.translate(" \t ").unwrap(), "");
}

// ============================================================================
// Subword mode
// ============================================================================

#[test]
fn test_subword_translation() {
    let dir = TempDir::new().unwrap();
    let session = subword_session(dir.path());
    assert_eq!(session.tokenization_mode(), TokenizationMode::Subword);
    assert_eq!(session.model_dir(), dir.path());
    // Pieces a,▁,b are reversed then joined back
    assert_eq!(session.translate("a b").unwrap(), "B A");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_translations_do_not_interleave() {
    let session = Arc::new(whitespace_session());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                let input = format!("w{i} x{i} y{i}");
                let expected = format!("Y{i} X{i} W{i}");
                for _ in 0..50 {
                    assert_eq!(session.translate(&input).unwrap(), expected);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
