//! Error types for translation sessions

/// Errors that can occur while opening or running a translation session.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("model_dir is empty")]
    EmptyModelDir,

    #[error("translation backend not enabled (build with the `ctranslate2` feature)")]
    BackendUnavailable,

    #[error("model load failed")]
    ModelLoad(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("tokenizer load failed")]
    TokenizerLoad(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("tokenization failed")]
    Tokenize(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("translation failed")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Render an error together with its source chain, e.g.
/// `model load failed: config.json not found`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
