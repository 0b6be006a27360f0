//! Error types for conversation summarization.

use thiserror::Error;

/// Largest message batch accepted by the service layer.
pub const MAX_MESSAGES_PER_REQUEST: usize = 1000;

/// Caller-supplied batch rejected before summarization starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The message list was absent or empty.
    #[error("Messages array is required for summarization")]
    MissingMessages,
    /// The message list exceeded [`MAX_MESSAGES_PER_REQUEST`].
    #[error("Maximum {max} messages allowed per summarization request")]
    TooManyMessages {
        /// Configured upper bound.
        max: usize,
        /// Number of messages received.
        actual: usize,
    },
}

/// A message lacks something the summary computation needs.
#[derive(Debug, Error)]
pub enum MalformedInputError {
    /// A required field was absent.
    #[error("message {index} is missing `{field}`")]
    MissingField {
        /// Position of the offending message.
        index: usize,
        /// Wire name of the missing field.
        field: &'static str,
    },
    /// The speaker role was not one of the known values.
    #[error("message {index} has unknown speaker `{value}`")]
    UnknownSpeaker {
        /// Position of the offending message.
        index: usize,
        /// Value received.
        value: String,
    },
    /// The timestamp could not be parsed as an ISO-8601 instant.
    #[error("message {index} has invalid timestamp `{value}`: {source}")]
    InvalidTimestamp {
        /// Position of the offending message.
        index: usize,
        /// Value received.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

/// Summarization failure. Always all-or-nothing.
#[derive(Debug, Error)]
pub enum SummarizationError {
    /// Wraps the malformed-input cause.
    #[error("Failed to summarize conversation: {0}")]
    Failed(#[from] MalformedInputError),
}

/// Convenience result alias for summarization.
pub type SummarizationResult<T> = Result<T, SummarizationError>;
