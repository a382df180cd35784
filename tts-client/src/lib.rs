//! Text-to-speech client library for the read-for-me workspace
//!
//! Provides a single interface over speech synthesis providers:
//! - Google Cloud Text-to-Speech (REST API)
//! - Mock provider for tests and offline runs

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

pub use config::ProviderConfig;
pub use error::{Result, TtsError};
pub use provider::{SpeechProvider, SpeechRequest, SpeechResponse, VoiceGender, VoiceParams};
pub use providers::{GoogleTtsProvider, MockProvider, create_provider};
