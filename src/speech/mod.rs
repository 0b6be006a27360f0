//! Speech-to-text collaborator.
//!
//! Recognition runs on the client device; the backend only acknowledges
//! requests so the mobile pipeline keeps a uniform API.

pub mod service;
pub mod types;

pub use service::{DEVICE_LANGUAGE, DEVICE_TRANSCRIPT, SpeechService};
pub use types::{SpeechToTextRequest, SpeechToTextResponse};
