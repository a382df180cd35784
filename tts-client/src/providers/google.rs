//! Google Cloud Text-to-Speech provider
//!
//! Calls the `text:synthesize` REST endpoint and decodes the base64
//! `audioContent` field into raw MP3 bytes.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, TtsError};
use crate::provider::{SpeechProvider, SpeechRequest, SpeechResponse, VoiceGender};

const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

/// Upstream limit on the `input.text` field
const MAX_INPUT_BYTES: usize = 5000;

/// Scope requested for tokens minted from a service-account key
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// How requests are authenticated
#[derive(Clone, PartialEq, Eq)]
pub enum GoogleAuth {
    /// Sent as the `X-Goog-Api-Key` header
    ApiKey(String),
    /// Sent as `Authorization: Bearer <token>`
    Bearer(String),
    /// Service-account JSON key; bearer tokens are minted from it on demand
    ServiceAccount(PathBuf),
}

impl fmt::Debug for GoogleAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::ServiceAccount(path) => f.debug_tuple("ServiceAccount").field(path).finish(),
        }
    }
}

enum Credentials {
    ApiKey(String),
    Bearer(String),
    ServiceAccount(CustomServiceAccount),
}

impl Credentials {
    fn load(auth: GoogleAuth) -> Result<Self> {
        Ok(match auth {
            GoogleAuth::ApiKey(key) => Self::ApiKey(key),
            GoogleAuth::Bearer(token) => Self::Bearer(token),
            GoogleAuth::ServiceAccount(path) => {
                let account = CustomServiceAccount::from_file(&path).map_err(|e| {
                    TtsError::AuthError(format!(
                        "failed to load service account key {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                log::debug!("Using service account key {}", path.display());
                Self::ServiceAccount(account)
            }
        })
    }
}

/// Provider for the Google Cloud Text-to-Speech API
pub struct GoogleTtsProvider {
    base_url: String,
    credentials: Credentials,
    client: Client,
}

impl GoogleTtsProvider {
    pub fn new(auth: GoogleAuth) -> Result<Self> {
        Self::with_base_url(auth, DEFAULT_BASE_URL)
    }

    /// Fails only when a service-account key cannot be loaded.
    pub fn with_base_url(auth: GoogleAuth, base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::load(auth)?,
            client: Client::new(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/text:synthesize", self.base_url)
    }
}

// Google API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f32,
    pitch: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

fn ssml_gender(gender: VoiceGender) -> &'static str {
    match gender {
        VoiceGender::Male => "MALE",
        VoiceGender::Female => "FEMALE",
        VoiceGender::Neutral => "NEUTRAL",
    }
}

fn build_body(request: &SpeechRequest) -> SynthesizeRequest<'_> {
    SynthesizeRequest {
        input: SynthesisInput {
            text: &request.text,
        },
        voice: VoiceSelection {
            language_code: &request.voice.language_code,
            ssml_gender: ssml_gender(request.voice.gender),
        },
        audio_config: AudioConfig {
            audio_encoding: "MP3",
            speaking_rate: request.voice.speaking_rate,
            pitch: request.voice.pitch,
        },
    }
}

fn decode_audio(body: &str) -> Result<Vec<u8>> {
    let response: SynthesizeResponse = serde_json::from_str(body)
        .map_err(|e| TtsError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    general_purpose::STANDARD
        .decode(response.audio_content.as_bytes())
        .map_err(|e| TtsError::InvalidResponse(format!("audioContent is not base64: {}", e)))
}

fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error_response) => error_response.error.message,
        Err(_) => body,
    }
}

#[async_trait]
impl SpeechProvider for GoogleTtsProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        if request.text.len() > MAX_INPUT_BYTES {
            log::warn!(
                "Chunk is {} bytes, above the {} byte provider limit",
                request.text.len(),
                MAX_INPUT_BYTES
            );
        }

        let builder = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&build_body(request));

        let builder = match &self.credentials {
            Credentials::ApiKey(key) => builder.header("X-Goog-Api-Key", key),
            Credentials::Bearer(token) => builder.bearer_auth(token),
            Credentials::ServiceAccount(account) => {
                let token = account
                    .token(&[CLOUD_PLATFORM_SCOPE])
                    .await
                    .map_err(|e| TtsError::AuthError(format!("failed to obtain access token: {}", e)))?;
                builder.bearer_auth(token.as_str())
            }
        };

        let response = builder.send().await.map_err(|e| TtsError::ApiError {
            message: format!("Request failed: {}", e),
            status_code: None,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TtsError::ApiError {
            message: format!("Failed to read response body: {}", e),
            status_code: Some(status.as_u16()),
        })?;

        if !status.is_success() {
            return Err(TtsError::ApiError {
                message: error_message(body),
                status_code: Some(status.as_u16()),
            });
        }

        let audio_content = decode_audio(&body)?;
        log::debug!(
            "Synthesized {} bytes of text into {} bytes of audio",
            request.text.len(),
            audio_content.len()
        );

        Ok(SpeechResponse { audio_content })
    }

    fn name(&self) -> &'static str {
        "Google Cloud TTS"
    }

    fn max_input_bytes(&self) -> usize {
        MAX_INPUT_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::VoiceParams;

    #[test]
    fn test_request_body_shape() {
        let request = SpeechRequest {
            text: "Hello there".to_string(),
            voice: VoiceParams::new()
                .with_gender(VoiceGender::Female)
                .with_speaking_rate(1.5)
                .with_pitch(-2.0),
        };

        let json = serde_json::to_value(build_body(&request)).unwrap();
        assert_eq!(json["input"]["text"], "Hello there");
        assert_eq!(json["voice"]["languageCode"], "en-US");
        assert_eq!(json["voice"]["ssmlGender"], "FEMALE");
        assert_eq!(json["audioConfig"]["audioEncoding"], "MP3");
        assert_eq!(json["audioConfig"]["speakingRate"], 1.5);
        assert_eq!(json["audioConfig"]["pitch"], -2.0);
    }

    #[test]
    fn test_decode_audio() {
        let body = r#"{"audioContent": "SUQzBAAAAAAA"}"#;
        let audio = decode_audio(body).unwrap();
        assert_eq!(&audio[..3], b"ID3");
    }

    #[test]
    fn test_decode_audio_rejects_bad_base64() {
        let body = r#"{"audioContent": "not base64!"}"#;
        assert!(matches!(
            decode_audio(body),
            Err(TtsError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_decode_audio_rejects_missing_field() {
        assert!(matches!(
            decode_audio("{}"),
            Err(TtsError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_message_from_google_json() {
        let body = r#"{"error": {"code": 400, "message": "Input is too long.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body.to_string()), "Input is too long.");
        assert_eq!(error_message("Bad Gateway".to_string()), "Bad Gateway");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GoogleTtsProvider::with_base_url(
            GoogleAuth::ApiKey("k".to_string()),
            "http://localhost:8080/",
        )
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/text:synthesize");
    }

    #[test]
    fn test_auth_debug_is_redacted() {
        let auth = GoogleAuth::ApiKey("secret-key".to_string());
        assert!(!format!("{:?}", auth).contains("secret-key"));
    }

    #[test]
    fn test_missing_service_account_key_is_auth_error() {
        let dir = tempfile::tempdir().unwrap();
        let auth = GoogleAuth::ServiceAccount(dir.path().join("absent.json"));

        let result = GoogleTtsProvider::new(auth);
        assert!(matches!(result, Err(TtsError::AuthError(msg)) if msg.contains("absent.json")));
    }

    #[test]
    fn test_malformed_service_account_key_is_auth_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        std::fs::write(&path, r#"{"type": "service_account"}"#).unwrap();

        let result = GoogleTtsProvider::new(GoogleAuth::ServiceAccount(path));
        assert!(matches!(result, Err(TtsError::AuthError(_))));
    }
}
