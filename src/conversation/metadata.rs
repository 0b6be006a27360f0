//! Descriptive metadata shared by both summary formats.

use std::collections::HashSet;

use crate::conversation::types::{ConversationMessage, Speaker};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Languages, participants and duration of a conversation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConversationMetadata {
    /// Distinct detected languages, first occurrence first.
    pub languages: Vec<String>,
    /// Number of distinct speaker roles.
    pub participant_count: usize,
    /// Human-readable duration.
    pub duration: String,
}

impl ConversationMetadata {
    /// Compute metadata for messages in the order given.
    #[must_use]
    pub fn from_messages(messages: &[ConversationMessage]) -> Self {
        Self {
            languages: distinct_languages(messages),
            participant_count: count_participants(messages),
            duration: describe_duration(messages),
        }
    }
}

fn distinct_languages(messages: &[ConversationMessage]) -> Vec<String> {
    let mut seen = HashSet::new();
    messages
        .iter()
        .filter(|message| seen.insert(message.detected_language.as_str()))
        .map(|message| message.detected_language.clone())
        .collect()
}

fn count_participants(messages: &[ConversationMessage]) -> usize {
    messages
        .iter()
        .map(|message| message.speaker)
        .collect::<HashSet<Speaker>>()
        .len()
}

/// Describe the span between the first and last message as positioned.
///
/// Messages are not re-sorted; an out-of-order tail yields `"< 1 minute"`.
#[must_use]
pub fn describe_duration(messages: &[ConversationMessage]) -> String {
    let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
        return "0 minutes".to_string();
    };

    let elapsed = last.timestamp - first.timestamp;
    match elapsed.num_milliseconds().div_euclid(MILLIS_PER_MINUTE) {
        minutes if minutes < 1 => "< 1 minute".to_string(),
        1 => "1 minute".to_string(),
        minutes => format!("{minutes} minutes"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default()
    }

    fn pair(gap: Duration) -> Vec<ConversationMessage> {
        let start = base_time();
        vec![
            ConversationMessage::new(Speaker::Speaker, "First", "en", start),
            ConversationMessage::new(Speaker::Listener, "Last", "en", start + gap),
        ]
    }

    #[test]
    fn test_duration_thresholds() {
        assert_eq!(describe_duration(&[]), "0 minutes");
        assert_eq!(describe_duration(&pair(Duration::seconds(30))), "< 1 minute");
        assert_eq!(describe_duration(&pair(Duration::seconds(60))), "1 minute");
        assert_eq!(describe_duration(&pair(Duration::seconds(119))), "1 minute");
        assert_eq!(describe_duration(&pair(Duration::seconds(300))), "5 minutes");
    }

    #[test]
    fn test_duration_uses_positions_not_order() {
        assert_eq!(describe_duration(&pair(Duration::seconds(-300))), "< 1 minute");
    }

    #[test]
    fn test_languages_keep_first_occurrence_order() {
        let start = base_time();
        let messages: Vec<ConversationMessage> = ["fr", "en", "fr", "es", "en"]
            .iter()
            .map(|lang| ConversationMessage::new(Speaker::Speaker, "x", *lang, start))
            .collect();

        let metadata = ConversationMetadata::from_messages(&messages);
        assert_eq!(metadata.languages, vec!["fr", "en", "es"]);
        assert_eq!(metadata.participant_count, 1);
    }

    #[test]
    fn test_participants_count_distinct_roles() {
        let metadata = ConversationMetadata::from_messages(&pair(Duration::seconds(5)));
        assert_eq!(metadata.participant_count, 2);
        assert_eq!(ConversationMetadata::from_messages(&[]).participant_count, 0);
    }
}
