//! Error types for the translation module.

use thiserror::Error;

/// Failure talking to the translation provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Provider answered without any usable candidate.
    #[error("provider returned no candidates")]
    NoCandidates,
}

/// Errors surfaced by [`TranslationService`](super::TranslationService).
#[derive(Debug, Error)]
pub enum TranslationError {
    /// A single translation failed.
    #[error("Failed to translate text: {0}")]
    Translate(#[source] ProviderError),

    /// One text of a batch failed; the whole batch is discarded.
    #[error("Failed to batch translate: {0}")]
    Batch(#[source] Box<TranslationError>),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Provider base URL is invalid.
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Convenience result alias for translation operations.
pub type TranslationResult<T> = Result<T, TranslationError>;
