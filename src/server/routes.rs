//! HTTP route handlers for the Parlance API.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conversation::{SummarizationRequest, SummarizationResponse, Summarizer};
use crate::speech::{SpeechToTextRequest, SpeechToTextResponse};
use crate::translation::{
    DEFAULT_TARGET_LANGUAGE, SupportedLanguage, TranslationRequest, TranslationResponse,
};

use super::error::ApiError;
use super::state::AppState;

/// Largest text batch accepted by `/api/batch-translate`.
pub const MAX_BATCH_TEXTS: usize = 100;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/translate", post(translate))
        .route("/api/detect-language", post(detect_language))
        .route("/api/supported-languages", get(supported_languages))
        .route("/api/batch-translate", post(batch_translate))
        .route("/api/speech-to-text", post(speech_to_text))
        .route("/api/detect-audio-language", post(detect_audio_language))
        .route("/api/speech/health", get(speech_health))
        .route("/api/summarize", post(summarize))
        .route("/api/summarize/health", get(summarize_health))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn service_health(service: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": service,
        "timestamp": Utc::now()
    }))
}

async fn speech_health() -> impl IntoResponse {
    service_health("speech-to-text")
}

async fn summarize_health() -> impl IntoResponse {
    service_health("summarization")
}

/// Unmatched route or method.
async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Route {method} {} not found", uri.path()))
}

fn require_text(value: &str, message: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(message.to_string()));
    }
    Ok(())
}

/// Handle translation requests.
async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Json(request) = payload?;
    require_text(&request.text, "Text is required for translation")?;

    let response = state.translation.translate(&request).await?;
    Ok(Json(response))
}

/// Language detection request.
#[derive(Debug, Deserialize)]
pub struct DetectLanguageRequest {
    /// Text to inspect.
    #[serde(default)]
    pub text: String,
}

/// Language detection response.
#[derive(Debug, Serialize)]
pub struct DetectLanguageResponse {
    /// Detected language code.
    pub language: String,
    /// Provider confidence.
    pub confidence: f64,
    /// Response time.
    pub timestamp: DateTime<Utc>,
}

/// Handle language detection requests.
async fn detect_language(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DetectLanguageRequest>, JsonRejection>,
) -> Result<Json<DetectLanguageResponse>, ApiError> {
    let Json(request) = payload?;
    require_text(&request.text, "Text is required for language detection")?;

    let detection = state.translation.detect_language(&request.text).await;
    Ok(Json(DetectLanguageResponse {
        language: detection.language,
        confidence: detection.confidence,
        timestamp: Utc::now(),
    }))
}

/// Supported languages response.
#[derive(Debug, Serialize)]
pub struct SupportedLanguagesResponse {
    /// Languages offered.
    pub languages: Vec<SupportedLanguage>,
    /// Number of languages.
    pub count: usize,
    /// Response time.
    pub timestamp: DateTime<Utc>,
}

/// List supported languages.
async fn supported_languages(
    State(state): State<Arc<AppState>>,
) -> Json<SupportedLanguagesResponse> {
    let languages = state.translation.supported_languages().await;
    let count = languages.len();

    Json(SupportedLanguagesResponse {
        languages,
        count,
        timestamp: Utc::now(),
    })
}

/// Batch translation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTranslateRequest {
    /// Texts to translate.
    #[serde(default)]
    pub texts: Vec<String>,
    /// Target language for every text.
    #[serde(default = "default_target_language")]
    pub target_language: String,
}

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

/// Batch translation response.
#[derive(Debug, Serialize)]
pub struct BatchTranslateResponse {
    /// One result per input text, in order.
    pub results: Vec<TranslationResponse>,
    /// Number of results.
    pub count: usize,
    /// Response time.
    pub timestamp: DateTime<Utc>,
}

/// Handle batch translation requests.
async fn batch_translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BatchTranslateRequest>, JsonRejection>,
) -> Result<Json<BatchTranslateResponse>, ApiError> {
    let Json(request) = payload?;

    if request.texts.is_empty() {
        return Err(ApiError::BadRequest(
            "An array of texts is required for batch translation".to_string(),
        ));
    }

    if request.texts.len() > MAX_BATCH_TEXTS {
        return Err(ApiError::BadRequest(format!(
            "Maximum {MAX_BATCH_TEXTS} texts allowed per batch request"
        )));
    }

    let results = state
        .translation
        .batch_translate(&request.texts, &request.target_language)
        .await?;
    let count = results.len();

    Ok(Json(BatchTranslateResponse {
        results,
        count,
        timestamp: Utc::now(),
    }))
}

/// Handle speech-to-text requests.
async fn speech_to_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeechToTextRequest>, JsonRejection>,
) -> Result<Json<SpeechToTextResponse>, ApiError> {
    let Json(request) = payload?;
    require_text(
        &request.audio_data,
        "Audio data is required for speech-to-text conversion",
    )?;

    Ok(Json(state.speech.speech_to_text(&request)))
}

/// Audio language detection request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectAudioLanguageRequest {
    /// Base64-encoded audio.
    #[serde(default)]
    pub audio_data: String,
}

/// Audio language detection response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectAudioLanguageResponse {
    /// Detected language code.
    pub language_code: String,
    /// Response time.
    pub timestamp: DateTime<Utc>,
}

/// Handle audio language detection requests.
async fn detect_audio_language(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DetectAudioLanguageRequest>, JsonRejection>,
) -> Result<Json<DetectAudioLanguageResponse>, ApiError> {
    let Json(request) = payload?;
    require_text(
        &request.audio_data,
        "Audio data is required for language detection",
    )?;

    Ok(Json(DetectAudioLanguageResponse {
        language_code: state.speech.detect_audio_language(&request.audio_data).to_string(),
        timestamp: Utc::now(),
    }))
}

/// Handle conversation summarization requests.
async fn summarize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummarizationRequest>, JsonRejection>,
) -> Result<Json<SummarizationResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let response = state.summarizer.summarize(request)?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn router() -> Router {
        // Handlers under test never reach the provider.
        let config = ServerConfig {
            translation_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 1,
            ..ServerConfig::default()
        };
        match AppState::new(&config) {
            Ok(state) => create_router(state),
            Err(err) => unreachable!("state should build: {err}"),
        }
    }

    async fn call(method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };
        let Ok(request) = request else {
            unreachable!("request should build");
        };

        let response = router()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn message(speaker: &str, text: &str, timestamp: &str) -> Value {
        json!({
            "speaker": speaker,
            "originalText": text,
            "translatedText": text,
            "detectedLanguage": "en",
            "timestamp": timestamp
        })
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (status, body) = call(Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

        let (_, body) = call(Method::GET, "/api/summarize/health", None).await;
        assert_eq!(body["service"], "summarization");

        let (_, body) = call(Method::GET, "/api/speech/health", None).await;
        assert_eq!(body["service"], "speech-to-text");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_envelope() {
        let (status, body) = call(Method::GET, "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "Route GET /api/nope not found");
        assert_eq!(body["statusCode"], 404);
    }

    #[tokio::test]
    async fn test_wrong_method_returns_not_found() {
        let (status, body) = call(Method::GET, "/api/summarize", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route GET /api/summarize not found");
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let (status, body) = call(Method::POST, "/api/translate", Some(json!({"text": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Text is required for translation");

        let (status, _) = call(Method::POST, "/api/detect-language", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = call(
            Method::POST,
            "/api/summarize",
            Some(json!({"messages": [], "format": "verbose"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
        assert!(body["message"].as_str().is_some_and(|m| m.contains("verbose")));
    }

    #[tokio::test]
    async fn test_batch_limits() {
        let (status, _) = call(Method::POST, "/api/batch-translate", Some(json!({"texts": []}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let texts: Vec<String> = (0..=MAX_BATCH_TEXTS).map(|i| format!("text {i}")).collect();
        let (status, body) =
            call(Method::POST, "/api/batch-translate", Some(json!({"texts": texts}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Maximum 100 texts allowed per batch request");
    }

    #[tokio::test]
    async fn test_speech_endpoints() {
        let (status, _) = call(Method::POST, "/api/speech-to-text", Some(json!({"audioData": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            Method::POST,
            "/api/speech-to-text",
            Some(json!({"audioData": "UklGRg==", "languageCode": "fr-FR"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transcript"], "Speech recognition is handled on the mobile device");
        assert_eq!(body["detectedLanguage"], "en-US");

        let (status, body) = call(
            Method::POST,
            "/api/detect-audio-language",
            Some(json!({"audioData": "UklGRg=="})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["languageCode"], "en-US");
    }

    #[tokio::test]
    async fn test_summarize_validation() {
        let (status, body) = call(Method::POST, "/api/summarize", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Messages array is required for summarization");

        let many: Vec<Value> = (0..1001)
            .map(|_| message("speaker", "hi", "2024-05-01T10:00:00Z"))
            .collect();
        let (status, body) = call(Method::POST, "/api/summarize", Some(json!({"messages": many}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Maximum 1000 messages allowed per summarization request"
        );
    }

    #[tokio::test]
    async fn test_summarize_non_array_messages_is_missing() {
        for messages in [Value::Null, json!("x"), json!({"speaker": "speaker"})] {
            let (status, body) =
                call(Method::POST, "/api/summarize", Some(json!({"messages": messages}))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Messages array is required for summarization");
        }
    }

    #[tokio::test]
    async fn test_summarize_detailed() {
        let messages = json!([
            message("speaker", "When should we meet?", "2024-05-01T10:00:00.000Z"),
            message("listener", "Tomorrow works", "2024-05-01T10:05:00.000Z"),
        ]);
        let (status, body) = call(
            Method::POST,
            "/api/summarize",
            Some(json!({"messages": messages, "format": "detailed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["participantCount"], 2);
        assert_eq!(body["duration"], "5 minutes");
        assert_eq!(body["languagesDetected"], json!(["en"]));
        assert_eq!(body["keyPoints"], json!(["Discussed timing/schedule"]));
        assert!(body["summary"].as_str().is_some_and(|s| s.contains("Total Messages: 2")));
    }

    #[tokio::test]
    async fn test_summarize_malformed_message_is_server_error() {
        let messages = json!([{ "speaker": "speaker" }]);
        let (status, body) =
            call(Method::POST, "/api/summarize", Some(json!({"messages": messages}))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert!(
            body["message"]
                .as_str()
                .is_some_and(|m| m.starts_with("Failed to summarize conversation"))
        );
    }
}
