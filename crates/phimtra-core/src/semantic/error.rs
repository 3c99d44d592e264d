use thiserror::Error;

/// Errors from the semantic keyword fallback.
#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("embedding dimension mismatch: expected {expected}, found {found}")]
    Dimension { expected: usize, found: usize },

    #[error("encoder initialization failed: {0}")]
    Init(String),

    #[error("encoder returned no embeddings")]
    EmptyResponse,
}
