//! Conversation turns, summarization requests and responses.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::conversation::errors::{MAX_MESSAGES_PER_REQUEST, MalformedInputError, ValidationError};

/// Role of the person behind a turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The person the device owner is listening to.
    Listener,
    /// The device owner.
    Speaker,
}

impl Speaker {
    /// Stable wire form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Listener => "listener",
            Self::Speaker => "speaker",
        }
    }

    /// Display label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Listener => "Listener",
            Self::Speaker => "Speaker",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "listener" => Ok(Self::Listener),
            "speaker" => Ok(Self::Speaker),
            _ => Err(value.to_string()),
        }
    }
}

/// Shape of the generated summary text.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFormat {
    /// One sentence.
    #[default]
    Brief,
    /// Labelled block with message previews.
    Detailed,
}

/// A single validated turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    /// Optional client-side identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Who said it.
    pub speaker: Speaker,
    /// Text as spoken.
    #[serde(default)]
    pub original_text: String,
    /// Text after translation.
    pub translated_text: String,
    /// Short language code of the original text.
    pub detected_language: String,
    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
    /// Optional recognition or translation confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ConversationMessage {
    /// Build a turn with the fields the summarizer reads.
    #[must_use]
    pub fn new(
        speaker: Speaker,
        translated_text: impl Into<String>,
        detected_language: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            speaker,
            original_text: String::new(),
            translated_text: translated_text.into(),
            detected_language: detected_language.into(),
            timestamp,
            confidence: None,
        }
    }

    /// Set the original (untranslated) text.
    #[must_use]
    pub fn with_original_text(mut self, text: impl Into<String>) -> Self {
        self.original_text = text.into();
        self
    }
}

/// A turn as received on the wire, before validation.
///
/// Every field is optional so that a missing value surfaces as a
/// [`MalformedInputError`] from the summarizer instead of a decoding error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    /// Optional client-side identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Speaker role (`listener` or `speaker`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Text as spoken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    /// Text after translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    /// Short language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    /// ISO-8601 instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Optional confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl MessagePayload {
    /// Validate into a [`ConversationMessage`].
    ///
    /// # Errors
    /// Returns an error naming the first missing or unparseable field.
    pub fn into_message(self, index: usize) -> Result<ConversationMessage, MalformedInputError> {
        let speaker = required(self.speaker, index, "speaker")?;
        let speaker = speaker
            .parse::<Speaker>()
            .map_err(|value| MalformedInputError::UnknownSpeaker { index, value })?;
        let translated_text = required(self.translated_text, index, "translatedText")?;
        let detected_language = required(self.detected_language, index, "detectedLanguage")?;
        let raw_timestamp = required(self.timestamp, index, "timestamp")?;
        let timestamp = parse_instant(&raw_timestamp).map_err(|source| {
            MalformedInputError::InvalidTimestamp {
                index,
                value: raw_timestamp.clone(),
                source,
            }
        })?;

        Ok(ConversationMessage {
            id: self.id,
            speaker,
            original_text: self.original_text.unwrap_or_default(),
            translated_text,
            detected_language,
            timestamp,
            confidence: self.confidence,
        })
    }
}

impl From<ConversationMessage> for MessagePayload {
    fn from(message: ConversationMessage) -> Self {
        Self {
            id: message.id,
            speaker: Some(message.speaker.as_str().to_string()),
            original_text: Some(message.original_text),
            translated_text: Some(message.translated_text),
            detected_language: Some(message.detected_language),
            timestamp: Some(message.timestamp.to_rfc3339()),
            confidence: message.confidence,
        }
    }
}

/// Parse an RFC 3339 instant; a date-time without offset is read as UTC.
fn parse_instant(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .or_else(|err| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| naive.and_utc())
                .map_err(|_| err)
        })
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, MalformedInputError> {
    value.ok_or(MalformedInputError::MissingField { index, field })
}

/// Summarization request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarizationRequest {
    /// Turns in chronological order. `null` or a non-array decodes as empty.
    #[serde(default, deserialize_with = "lenient_messages")]
    pub messages: Vec<MessagePayload>,
    /// Requested summary shape.
    #[serde(default)]
    pub format: SummaryFormat,
}

fn lenient_messages<'de, D>(deserializer: D) -> Result<Vec<MessagePayload>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

impl SummarizationRequest {
    /// Build a request from already-validated turns.
    #[must_use]
    pub fn new(messages: Vec<ConversationMessage>, format: SummaryFormat) -> Self {
        Self {
            messages: messages.into_iter().map(MessagePayload::from).collect(),
            format,
        }
    }

    /// Enforce the batch-size policy of the service layer.
    ///
    /// # Errors
    /// Returns an error if the batch is empty or too large.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            return Err(ValidationError::MissingMessages);
        }

        if self.messages.len() > MAX_MESSAGES_PER_REQUEST {
            return Err(ValidationError::TooManyMessages {
                max: MAX_MESSAGES_PER_REQUEST,
                actual: self.messages.len(),
            });
        }

        Ok(())
    }
}

/// Summary, key points and metadata for one conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizationResponse {
    /// Summary text.
    pub summary: String,
    /// At most five short theme labels.
    pub key_points: Vec<String>,
    /// Number of distinct speaker roles.
    pub participant_count: usize,
    /// Human-readable duration.
    pub duration: String,
    /// Distinct languages in first-seen order.
    pub languages_detected: Vec<String>,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
}
