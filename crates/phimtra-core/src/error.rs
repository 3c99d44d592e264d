use thiserror::Error;

use crate::semantic::SemanticError;

#[derive(Debug, Error)]
pub enum PhimtraError {
    #[error("config error: {0}")]
    Config(String),

    #[error("semantic fallback failed: {0}")]
    Semantic(#[from] SemanticError),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
