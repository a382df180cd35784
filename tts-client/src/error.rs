use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error(
        "No credentials found for {provider}. Set {env_var}, an access token or GOOGLE_APPLICATION_CREDENTIALS, or add them to the config file."
    )]
    MissingCredentials { provider: String, env_var: String },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("API error{}: {message}", status_code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, TtsError>;
