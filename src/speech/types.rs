//! Speech request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_ENCODING: &str = "LINEAR16";
const DEFAULT_SAMPLE_RATE_HERTZ: u32 = 16_000;
const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Audio submitted for transcription.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechToTextRequest {
    /// Base64-encoded audio.
    #[serde(default)]
    pub audio_data: String,
    /// Audio encoding, `LINEAR16` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Sample rate, 16 kHz when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate_hertz: Option<u32>,
    /// Language hint, `en-US` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl SpeechToTextRequest {
    /// Effective encoding.
    #[must_use]
    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }

    /// Effective sample rate.
    #[must_use]
    pub fn sample_rate_hertz(&self) -> u32 {
        self.sample_rate_hertz.unwrap_or(DEFAULT_SAMPLE_RATE_HERTZ)
    }

    /// Effective language hint.
    #[must_use]
    pub fn language_code(&self) -> &str {
        self.language_code.as_deref().unwrap_or(DEFAULT_LANGUAGE_CODE)
    }
}

/// Transcription result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechToTextResponse {
    /// Recognized text.
    pub transcript: String,
    /// Recognition confidence.
    pub confidence: f64,
    /// Language of the audio.
    pub detected_language: String,
    /// When the result was produced.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request: SpeechToTextRequest =
            serde_json::from_str(r#"{"audioData":"UklGRg=="}"#).unwrap_or_default();
        assert_eq!(request.audio_data, "UklGRg==");
        assert_eq!(request.encoding(), "LINEAR16");
        assert_eq!(request.sample_rate_hertz(), 16_000);
        assert_eq!(request.language_code(), "en-US");
    }
}
