//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::conversation::ExtractiveSummarizer;
use crate::speech::SpeechService;
use crate::translation::{TranslationError, TranslationService};

/// Shared application state.
pub struct AppState {
    /// Translation provider client.
    pub translation: TranslationService,
    /// Speech collaborator.
    pub speech: SpeechService,
    /// Conversation summarizer.
    pub summarizer: ExtractiveSummarizer,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    /// Returns an error if the translation client cannot be created.
    pub fn new(config: &ServerConfig) -> Result<Arc<Self>, TranslationError> {
        let translation =
            TranslationService::new(&config.translation_url, config.request_timeout())?;

        Ok(Arc::new(Self {
            translation,
            speech: SpeechService::new(),
            summarizer: ExtractiveSummarizer::new(),
        }))
    }
}
