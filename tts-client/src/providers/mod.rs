//! Speech provider implementations

mod google;
pub mod mock;

pub use google::{GoogleAuth, GoogleTtsProvider};
pub use mock::MockProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, TtsError};
use crate::provider::SpeechProvider;
use std::path::PathBuf;

/// Environment variables checked for a Google API key, in order
const API_KEY_VARS: &[&str] = &["GOOGLE_TTS_API_KEY", "GOOGLE_API_KEY"];

/// Environment variable checked for an OAuth access token
const ACCESS_TOKEN_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Application Default Credentials service-account key path
const CREDENTIALS_FILE_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Create the provider for a run from config and the process environment
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn SpeechProvider>> {
    let auth = resolve_auth(config, |name| std::env::var(name).ok())?;
    let provider = match &config.base_url {
        Some(url) => GoogleTtsProvider::with_base_url(auth, url)?,
        None => GoogleTtsProvider::new(auth)?,
    };
    Ok(Box::new(provider))
}

/// Get credentials from config or environment variables
///
/// API keys win over access tokens, which win over a service-account key
/// file. Within each kind, config values win over the environment.
fn resolve_auth<F>(config: &ProviderConfig, env: F) -> Result<GoogleAuth>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = non_empty(config.api_key.clone()) {
        return Ok(GoogleAuth::ApiKey(key));
    }

    for var in API_KEY_VARS {
        if let Some(key) = non_empty(env(var)) {
            return Ok(GoogleAuth::ApiKey(key));
        }
    }

    if let Some(token) = non_empty(config.access_token.clone()) {
        return Ok(GoogleAuth::Bearer(token));
    }

    if let Some(token) = non_empty(env(ACCESS_TOKEN_VAR)) {
        return Ok(GoogleAuth::Bearer(token));
    }

    if let Some(path) = config
        .credentials_file
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        return Ok(GoogleAuth::ServiceAccount(path.clone()));
    }

    if let Some(path) = non_empty(env(CREDENTIALS_FILE_VAR)) {
        return Ok(GoogleAuth::ServiceAccount(PathBuf::from(path)));
    }

    Err(TtsError::MissingCredentials {
        provider: "Google Cloud Text-to-Speech".to_string(),
        env_var: API_KEY_VARS[0].to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
