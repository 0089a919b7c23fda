//! Error types for vocabulary generation.
//!
//! Every failure terminates the request. Nothing here is retried.

use thiserror::Error;

/// Failure to turn the model reply into a [`VocabularyDocument`].
///
/// [`VocabularyDocument`]: crate::vocabulary::VocabularyDocument
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("reply does not contain a fenced code block")]
    MissingFence,

    #[error("fenced block is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("fenced block does not match the vocabulary schema: {0}")]
    SchemaMismatch(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl VocabError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, VocabError::Validation(_))
    }
}

pub type VocabResult<T> = Result<T, VocabError>;
