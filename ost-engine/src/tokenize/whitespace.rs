//! Whitespace tokenization used when no SentencePiece model is available

/// Characters that separate tokens in whitespace mode
const SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Split on space, tab, CR and LF, dropping empty fragments.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split(SEPARATORS)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join tokens with a single space.
pub fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}
