use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Provider-specific configuration
///
/// Embedded as the `[provider]` table of the application config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (optional, can use env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// OAuth access token, e.g. from `gcloud auth print-access-token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Service-account JSON key (same format as GOOGLE_APPLICATION_CREDENTIALS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,

    /// Custom base URL (for proxies or regional endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}
