//! Shared fixtures: a stub translation provider and a running Parlance server.
#![allow(dead_code)]

use std::error::Error;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use parlance::config::ServerConfig;
use parlance::server::{AppState, build_app, serve};

pub type TestResult<T = ()> = Result<T, Box<dyn Error + Send + Sync>>;

#[derive(Deserialize)]
struct DetectBody {
    q: String,
}

#[derive(Deserialize)]
struct TranslateBody {
    q: String,
    source: String,
    target: String,
}

async fn detect(Json(body): Json<DetectBody>) -> Json<Value> {
    let candidates = if body.q.trim().is_empty() {
        json!([])
    } else if body.q.contains("Bonjour") {
        json!([{ "language": "fr", "confidence": 92.0 }])
    } else if body.q.contains("Hola") {
        json!([{ "language": "es", "confidence": 88.0 }])
    } else {
        json!([{ "language": "en", "confidence": 95.0 }])
    };
    Json(candidates)
}

async fn translate(Json(body): Json<TranslateBody>) -> (StatusCode, Json<Value>) {
    if body.q == "boom" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Server error" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "translatedText": format!("[{}>{}] {}", body.source, body.target, body.q) })),
    )
}

async fn languages() -> Json<Value> {
    Json(json!([
        { "code": "en", "name": "English", "targets": ["es", "fr"] },
        { "code": "es", "name": "Spanish", "targets": ["en"] },
        { "code": "fr", "name": "French", "targets": ["en"] }
    ]))
}

async fn bind_and_spawn(app: Router) -> TestResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        serve(listener, app, std::future::pending())
            .await
            .expect("test server run");
    });
    Ok(format!("http://{addr}"))
}

/// Start a LibreTranslate-like stub and return its base URL.
pub async fn spawn_provider() -> TestResult<String> {
    let app = Router::new()
        .route("/detect", post(detect))
        .route("/translate", post(translate))
        .route("/languages", get(languages));
    bind_and_spawn(app).await
}

/// Start Parlance against `provider_url` and return its base URL.
pub async fn spawn_parlance(provider_url: &str) -> TestResult<String> {
    let config = ServerConfig {
        translation_url: provider_url.to_string(),
        request_timeout_secs: 2,
        ..ServerConfig::default()
    };
    let state = AppState::new(&config)?;
    bind_and_spawn(build_app(state, &config)).await
}

/// Provider stub plus Parlance, with a client to drive them.
pub async fn setup_test_server() -> TestResult<(String, reqwest::Client)> {
    let provider = spawn_provider().await?;
    let base_url = spawn_parlance(&provider).await?;
    Ok((base_url, reqwest::Client::new()))
}
