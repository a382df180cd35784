use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Voice category requested from the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    #[default]
    Male,
    Female,
    Neutral,
}

impl VoiceGender {
    /// Map a user-supplied name to a voice category.
    ///
    /// Unrecognized names fall back to `Male` without an error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "female" => Self::Female,
            "neutral" => Self::Neutral,
            _ => Self::Male,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Neutral => "neutral",
        }
    }
}

/// Voice configuration shared by every chunk of a run
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceParams {
    pub gender: VoiceGender,
    /// Speaking rate multiplier (1.0 = normal speed)
    pub speaking_rate: f32,
    /// Pitch offset in semitones
    pub pitch: f32,
    /// BCP-47 language code, e.g. "en-US"
    pub language_code: String,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            gender: VoiceGender::Male,
            speaking_rate: 1.0,
            pitch: 0.0,
            language_code: "en-US".to_string(),
        }
    }
}

impl VoiceParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: VoiceGender) -> Self {
        self.gender = gender;
        self
    }

    /// Out-of-range values are sent as-is and rejected by the provider.
    pub fn with_speaking_rate(mut self, rate: f32) -> Self {
        self.speaking_rate = rate;
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }
}

/// One synthesis call: a single chunk of text and the voice to read it with
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: VoiceParams,
}

/// Encoded audio returned for one request
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    pub audio_content: Vec<u8>,
}

/// Trait for speech synthesis providers
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize one request into encoded MP3 bytes
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResponse>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;

    /// Largest accepted input, in UTF-8 bytes
    fn max_input_bytes(&self) -> usize;
}
