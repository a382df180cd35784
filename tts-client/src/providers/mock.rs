//! Mock speech provider for testing
//!
//! Returns deterministic audio bytes for each request and can be told to
//! fail on a given call, so pipeline ordering and abort behavior can be
//! checked without network access.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, TtsError};
use crate::provider::{SpeechProvider, SpeechRequest, SpeechResponse};

/// A mock provider that echoes request text back as "audio"
pub struct MockProvider {
    /// 1-based call number that fails (None = always succeed)
    fail_on_call: Option<usize>,
    /// Current call count
    call_count: AtomicUsize,
    /// Texts received, in call order
    requests: Mutex<Vec<String>>,
    /// Input limit reported to callers
    max_input_bytes: usize,
}

impl MockProvider {
    /// Create a provider that always succeeds
    pub fn always_succeeds() -> Self {
        Self {
            fail_on_call: None,
            call_count: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            max_input_bytes: 5000,
        }
    }

    /// Create a provider whose `n`-th call (1-based) fails with an API error
    pub fn fails_on_call(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::always_succeeds()
        }
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the texts received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// The audio bytes this provider returns for `text`
    pub fn audio_for(text: &str) -> Vec<u8> {
        format!("<{}>", text).into_bytes()
    }
}

#[async_trait]
impl SpeechProvider for MockProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResponse> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.text.clone());
        }

        if self.fail_on_call == Some(call_num) {
            return Err(TtsError::ApiError {
                message: format!("mock failure on call {}", call_num),
                status_code: Some(500),
            });
        }

        Ok(SpeechResponse {
            audio_content: Self::audio_for(&request.text),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn max_input_bytes(&self) -> usize {
        self.max_input_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::VoiceParams;

    fn request(text: &str) -> SpeechRequest {
        SpeechRequest {
            text: text.to_string(),
            voice: VoiceParams::default(),
        }
    }

    #[tokio::test]
    async fn test_always_succeeds() {
        let provider = MockProvider::always_succeeds();

        let result = provider.synthesize(&request("hello")).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().audio_content, b"<hello>".to_vec());
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.requests(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_fails_on_second_call() {
        let provider = MockProvider::fails_on_call(2);

        assert!(provider.synthesize(&request("one")).await.is_ok());
        assert!(provider.synthesize(&request("two")).await.is_err());
        assert!(provider.synthesize(&request("three")).await.is_ok());
        assert_eq!(provider.call_count(), 3);
    }
}
