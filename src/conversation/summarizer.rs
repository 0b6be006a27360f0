//! Extractive conversation summarizer.
//!
//! Produces templated summaries from message counts, metadata and previews of
//! the translated text. No model is involved, so the output is deterministic
//! apart from the generation timestamp.

use chrono::Utc;
use tracing::debug;

use crate::conversation::errors::{MalformedInputError, SummarizationResult};
use crate::conversation::key_points::extract_key_points;
use crate::conversation::metadata::ConversationMetadata;
use crate::conversation::types::{
    ConversationMessage, MessagePayload, SummarizationRequest, SummarizationResponse,
    SummaryFormat,
};

/// Number of messages shown at each end of a detailed summary.
const PREVIEW_WINDOW: usize = 3;

const NO_CONVERSATION: &str = "No conversation recorded yet.";

/// Turns a conversation into a summary response.
pub trait Summarizer {
    /// Summarize the request.
    ///
    /// # Errors
    /// Returns an error if any message is malformed. No partial result is produced.
    fn summarize(&self, request: SummarizationRequest)
    -> SummarizationResult<SummarizationResponse>;
}

/// Template-based summarizer with no state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractiveSummarizer;

impl ExtractiveSummarizer {
    /// Create the summarizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(
        &self,
        request: SummarizationRequest,
    ) -> SummarizationResult<SummarizationResponse> {
        let SummarizationRequest { messages, format } = request;
        let messages = validate_messages(messages)?;
        let metadata = ConversationMetadata::from_messages(&messages);

        let summary = match format {
            SummaryFormat::Brief => brief_summary(&messages, &metadata),
            SummaryFormat::Detailed => detailed_summary(&messages, &metadata),
        };
        let key_points = extract_key_points(&messages);

        debug!(
            "Summarized {} messages ({format:?}) into {} key points",
            messages.len(),
            key_points.len()
        );

        Ok(SummarizationResponse {
            summary,
            key_points,
            participant_count: metadata.participant_count,
            duration: metadata.duration,
            languages_detected: metadata.languages,
            timestamp: Utc::now(),
        })
    }
}

fn validate_messages(
    payloads: Vec<MessagePayload>,
) -> Result<Vec<ConversationMessage>, MalformedInputError> {
    payloads
        .into_iter()
        .enumerate()
        .map(|(index, payload)| payload.into_message(index))
        .collect()
}

fn brief_summary(messages: &[ConversationMessage], metadata: &ConversationMetadata) -> String {
    if messages.is_empty() {
        return NO_CONVERSATION.to_string();
    }

    format!(
        "Conversation of {} over {} in {}.",
        count_noun(messages.len(), "message"),
        metadata.duration,
        metadata.languages.join(", ")
    )
}

fn detailed_summary(messages: &[ConversationMessage], metadata: &ConversationMetadata) -> String {
    let total = messages.len();
    let mut lines = vec![
        "Conversation Summary:".to_string(),
        format!("- Total Messages: {total}"),
        format!("- Duration: {}", metadata.duration),
        format!("- Languages: {}", metadata.languages.join(", ")),
        format!("- Participants: {}", metadata.participant_count),
        String::new(),
        "First messages:".to_string(),
    ];

    let preview_count = total.min(PREVIEW_WINDOW);
    lines.extend(messages[..preview_count].iter().map(render_turn));

    if total > PREVIEW_WINDOW * 2 {
        lines.push(format!(
            "... {} omitted ...",
            count_noun(total - PREVIEW_WINDOW * 2, "message")
        ));
    }

    if total > PREVIEW_WINDOW {
        let tail_start = total.saturating_sub(PREVIEW_WINDOW).max(preview_count);
        lines.push(String::new());
        lines.push("Last messages:".to_string());
        lines.extend(messages[tail_start..].iter().map(render_turn));
    }

    lines.join("\n")
}

fn render_turn(message: &ConversationMessage) -> String {
    format!("{}: {}", message.speaker.label(), message.translated_text)
}

fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
