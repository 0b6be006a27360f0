//! Translation through a LibreTranslate-compatible provider.
//!
//! Provides:
//! - Text translation with optional source detection
//! - Language detection with an English fallback
//! - Supported language listing with a built-in fallback
//! - Concurrent batch translation

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_PROVIDER_URL, TranslationService};
pub use error::{ProviderError, TranslationError, TranslationResult};
pub use types::{
    DEFAULT_TARGET_LANGUAGE, LanguageDetection, SupportedLanguage, TranslationRequest,
    TranslationResponse,
};
