//! Conversation summarization.
//!
//! Turns an ordered list of translated dialogue turns into a short summary,
//! a handful of key points and descriptive metadata:
//! - `types`: wire and domain types for messages, requests and responses
//! - `errors`: validation and malformed-input failures
//! - `metadata`: languages, participants and duration
//! - `key_points`: question-word theme detection
//! - `summarizer`: the `Summarizer` interface and its extractive implementation

pub mod errors;
pub mod key_points;
pub mod metadata;
pub mod summarizer;
pub mod types;

pub use errors::{
    MAX_MESSAGES_PER_REQUEST, MalformedInputError, SummarizationError, SummarizationResult,
    ValidationError,
};
pub use key_points::{MAX_KEY_POINTS, extract_key_points};
pub use metadata::{ConversationMetadata, describe_duration};
pub use summarizer::{ExtractiveSummarizer, Summarizer};
pub use types::{
    ConversationMessage, MessagePayload, Speaker, SummarizationRequest, SummarizationResponse,
    SummaryFormat,
};
