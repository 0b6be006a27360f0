//! Request and result types for translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Target language used when the caller does not pick one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// A translation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    /// Text to translate.
    #[serde(default)]
    pub text: String,
    /// Target language code, `en` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    /// Source language code, detected when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
}

impl TranslationRequest {
    /// Create a request with detection and the default target.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_language: None,
            source_language: None,
        }
    }

    /// Set the target language.
    #[must_use]
    pub fn with_target(mut self, language: impl Into<String>) -> Self {
        self.target_language = Some(language.into());
        self
    }

    /// Set the source language, skipping detection.
    #[must_use]
    pub fn with_source(mut self, language: impl Into<String>) -> Self {
        self.source_language = Some(language.into());
        self
    }

    /// Effective target language.
    #[must_use]
    pub fn target(&self) -> &str {
        non_empty(self.target_language.as_deref()).unwrap_or(DEFAULT_TARGET_LANGUAGE)
    }

    /// Caller-provided source language, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        non_empty(self.source_language.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A completed translation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResponse {
    /// Text as received.
    pub original_text: String,
    /// Translated text.
    pub translated_text: String,
    /// Source language used.
    pub detected_language: String,
    /// Detection confidence, `1.0` when the source was given.
    pub confidence: f64,
    /// When the translation completed.
    pub timestamp: DateTime<Utc>,
}

/// Result of language detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetection {
    /// Detected language code.
    pub language: String,
    /// Provider confidence.
    pub confidence: f64,
}

impl LanguageDetection {
    /// Assumed result when detection is unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            language: DEFAULT_TARGET_LANGUAGE.to_string(),
            confidence: 0.5,
        }
    }
}

/// A language offered by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedLanguage {
    /// Language code.
    pub code: String,
    /// English name.
    pub name: String,
}

impl SupportedLanguage {
    fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    /// Common languages returned when the provider list is unreachable.
    #[must_use]
    pub fn common() -> Vec<Self> {
        vec![
            Self::new("en", "English"),
            Self::new("es", "Spanish"),
            Self::new("fr", "French"),
            Self::new("de", "German"),
            Self::new("it", "Italian"),
            Self::new("pt", "Portuguese"),
            Self::new("ru", "Russian"),
            Self::new("ja", "Japanese"),
            Self::new("ko", "Korean"),
            Self::new("zh", "Chinese"),
        ]
    }
}
