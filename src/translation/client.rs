//! LibreTranslate-compatible provider client.
//!
//! Endpoints used: `POST /detect`, `POST /translate`, `GET /languages`.

use std::time::Duration;

use chrono::Utc;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::translation::error::{ProviderError, TranslationError, TranslationResult};
use crate::translation::types::{
    LanguageDetection, SupportedLanguage, TranslationRequest, TranslationResponse,
};

/// Public LibreTranslate instance.
pub const DEFAULT_PROVIDER_URL: &str = "https://libretranslate.com";

/// Connection timeout for provider calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Translation service backed by a remote provider.
#[derive(Clone, Debug)]
pub struct TranslationService {
    client: reqwest::Client,
    base_url: Url,
}

impl TranslationService {
    /// Create a service for the provider at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> TranslationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| TranslationError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base(base_url)?,
        })
    }

    /// Provider base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Detect the language of `text`.
    ///
    /// Never fails: an unreachable provider or an empty answer yields English
    /// with confidence `0.5`.
    pub async fn detect_language(&self, text: &str) -> LanguageDetection {
        match self.request_detection(text).await {
            Ok(detection) => detection,
            Err(err) => {
                warn!("Language detection failed, assuming English: {err}");
                LanguageDetection::fallback()
            }
        }
    }

    /// Translate a single text.
    ///
    /// Skips the provider when source and target languages match.
    ///
    /// # Errors
    /// Returns an error if the provider call fails.
    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> TranslationResult<TranslationResponse> {
        let target = request.target();
        let (source, confidence) = match request.source() {
            Some(source) => (source.to_string(), 1.0),
            None => {
                let detection = self.detect_language(&request.text).await;
                (detection.language, detection.confidence)
            }
        };

        let translated_text = if source == target {
            debug!("Source and target are both {target}, skipping provider");
            request.text.clone()
        } else {
            self.request_translation(&request.text, &source, target)
                .await
                .map_err(TranslationError::Translate)?
        };

        Ok(TranslationResponse {
            original_text: request.text.clone(),
            translated_text,
            detected_language: source,
            confidence,
            timestamp: Utc::now(),
        })
    }

    /// List languages offered by the provider.
    ///
    /// Falls back to [`SupportedLanguage::common`] when the provider is unavailable.
    pub async fn supported_languages(&self) -> Vec<SupportedLanguage> {
        match self.request_languages().await {
            Ok(languages) => languages,
            Err(err) => {
                warn!("Fetching supported languages failed, using built-in list: {err}");
                SupportedLanguage::common()
            }
        }
    }

    /// Translate every text concurrently into `target_language`.
    ///
    /// # Errors
    /// Returns an error if any single translation fails.
    pub async fn batch_translate(
        &self,
        texts: &[String],
        target_language: &str,
    ) -> TranslationResult<Vec<TranslationResponse>> {
        let requests: Vec<TranslationRequest> = texts
            .iter()
            .map(|text| TranslationRequest::new(text.as_str()).with_target(target_language))
            .collect();

        debug!("Batch translating {} texts into {target_language}", requests.len());

        try_join_all(requests.iter().map(|request| self.translate(request)))
            .await
            .map_err(|err| TranslationError::Batch(Box::new(err)))
    }

    async fn request_detection(&self, text: &str) -> Result<LanguageDetection, ProviderError> {
        let response = self
            .client
            .post(self.endpoint("detect")?)
            .json(&DetectBody { q: text })
            .send()
            .await?;

        let candidates: Vec<DetectCandidate> = decode(response).await?;
        candidates
            .into_iter()
            .next()
            .map(|candidate| LanguageDetection {
                language: candidate.language,
                confidence: candidate.confidence,
            })
            .ok_or(ProviderError::NoCandidates)
    }

    async fn request_translation(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint("translate")?)
            .json(&TranslateBody {
                q: text,
                source,
                target,
                format: "text",
            })
            .send()
            .await?;

        let body: TranslateReply = decode(response).await?;
        Ok(body.translated_text)
    }

    async fn request_languages(&self) -> Result<Vec<SupportedLanguage>, ProviderError> {
        let response = self.client.get(self.endpoint("languages")?).send().await?;
        let languages: Vec<SupportedLanguage> = decode(response).await?;
        if languages.is_empty() {
            return Err(ProviderError::NoCandidates);
        }
        Ok(languages)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        Ok(self.base_url.join(path)?)
    }
}

/// Ensure the base URL ends with `/` so endpoint joins keep any path prefix.
fn normalize_base(base_url: &str) -> Result<Url, url::ParseError> {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

// Provider wire structures

#[derive(Serialize)]
struct DetectBody<'a> {
    q: &'a str,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetectCandidate {
    language: String,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_keeps_prefix() {
        let url = normalize_base("http://localhost:5000/lt").ok();
        let joined = url.and_then(|u| u.join("translate").ok());
        assert_eq!(
            joined.map(|u| u.to_string()),
            Some("http://localhost:5000/lt/translate".to_string())
        );
    }

    #[test]
    fn test_normalize_base_root() {
        let url = normalize_base(DEFAULT_PROVIDER_URL).ok();
        let joined = url.and_then(|u| u.join("detect").ok());
        assert_eq!(
            joined.map(|u| u.to_string()),
            Some("https://libretranslate.com/detect".to_string())
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let service = TranslationService::new("not a url", Duration::from_secs(1));
        assert!(matches!(service, Err(TranslationError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_same_language_skips_provider() {
        // Port 9 is discard; the provider must not be contacted at all.
        let Ok(service) = TranslationService::new("http://127.0.0.1:9", Duration::from_millis(200))
        else {
            unreachable!("client should build");
        };
        let request = TranslationRequest::new("Hello world")
            .with_source("en")
            .with_target("en");

        let result = service.translate(&request).await;
        let Ok(response) = result else {
            unreachable!("same-language translation must not fail");
        };
        assert_eq!(response.translated_text, "Hello world");
        assert_eq!(response.detected_language, "en");
        assert!((response.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unreachable_provider_falls_back() {
        let Ok(service) = TranslationService::new("http://127.0.0.1:9", Duration::from_millis(200))
        else {
            unreachable!("client should build");
        };

        let detection = service.detect_language("Bonjour").await;
        assert_eq!(detection, LanguageDetection::fallback());

        let languages = service.supported_languages().await;
        assert_eq!(languages, SupportedLanguage::common());

        let err = service
            .translate(&TranslationRequest::new("Hola").with_source("es"))
            .await
            .err();
        assert!(
            err.map(|e| e.to_string())
                .is_some_and(|m| m.starts_with("Failed to translate text"))
        );
    }
}
