//! Device-backed speech service.

use chrono::Utc;
use tracing::debug;

use crate::speech::types::{SpeechToTextRequest, SpeechToTextResponse};

/// Transcript returned for every request; the device does the recognition.
pub const DEVICE_TRANSCRIPT: &str = "Speech recognition is handled on the mobile device";

/// Language reported for all audio.
pub const DEVICE_LANGUAGE: &str = "en-US";

/// Stateless speech collaborator.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpeechService;

#[allow(clippy::unused_self)]
impl SpeechService {
    /// Create the service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Acknowledge an audio submission.
    #[must_use]
    pub fn speech_to_text(&self, request: &SpeechToTextRequest) -> SpeechToTextResponse {
        debug!(
            "Speech request: {} base64 chars, {} at {} Hz, hint {}",
            request.audio_data.len(),
            request.encoding(),
            request.sample_rate_hertz(),
            request.language_code()
        );

        SpeechToTextResponse {
            transcript: DEVICE_TRANSCRIPT.to_string(),
            confidence: 1.0,
            detected_language: DEVICE_LANGUAGE.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Report the language of submitted audio.
    #[must_use]
    pub fn detect_audio_language(&self, audio_data: &str) -> &'static str {
        debug!("Audio language request: {} base64 chars", audio_data.len());
        DEVICE_LANGUAGE
    }
}
