//! Key point extraction from question words.

use crate::conversation::types::ConversationMessage;

/// Upper bound on returned key points.
pub const MAX_KEY_POINTS: usize = 5;

/// Cue substring and the label it produces, in scan order.
const THEMES: [(&str, &str); 5] = [
    ("when", "Discussed timing/schedule"),
    ("where", "Discussed location"),
    ("how", "Discussed methods/process"),
    ("why", "Discussed reasons/motivation"),
    ("what", "Discussed objectives/items"),
];

const MULTILINGUAL_NOTE: &str = "Multiple languages used";

/// Detect discussed themes across all translated text.
///
/// Matching is a plain substring test on the lowercased concatenation, so
/// `"however"` counts as `how`. Falls back to a message count and a static
/// note when nothing matches.
#[must_use]
pub fn extract_key_points(messages: &[ConversationMessage]) -> Vec<String> {
    let corpus = messages
        .iter()
        .map(|message| message.translated_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut points: Vec<String> = THEMES
        .iter()
        .filter(|(cue, _)| corpus.contains(cue))
        .map(|(_, label)| (*label).to_string())
        .collect();

    if points.is_empty() {
        points = vec![
            format!("{} messages exchanged", messages.len()),
            MULTILINGUAL_NOTE.to_string(),
        ];
    }

    points.truncate(MAX_KEY_POINTS);
    points
}
