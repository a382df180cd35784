//! read-for-me configuration management.

use crate::text::DEFAULT_MAX_CHUNK_BYTES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tts_client::{ProviderConfig, VoiceGender, VoiceParams};

// Defaults for Google Cloud TTS voices
const DEFAULT_SPEED: f32 = 1.0;
const DEFAULT_PITCH: f32 = 0.0;
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_OUTPUT_DIR: &str = "audio_files";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadForMeConfig {
    /// Voice gender: male, female or neutral. Anything else reads as male.
    #[serde(default = "default_gender")]
    pub gender: String,

    /// Speaking rate multiplier (0.25-4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Pitch offset in semitones (-20.0-20.0)
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// BCP-47 language code of the voice
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory the audio files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum chunk size in UTF-8 bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Credentials and endpoint for the speech provider
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_gender() -> String {
    VoiceGender::Male.as_str().to_string()
}

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

fn default_pitch() -> f32 {
    DEFAULT_PITCH
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_BYTES
}

impl Default for ReadForMeConfig {
    fn default() -> Self {
        Self {
            gender: default_gender(),
            speed: default_speed(),
            pitch: default_pitch(),
            language: default_language(),
            output_dir: default_output_dir(),
            chunk_size: default_chunk_size(),
            provider: ProviderConfig::default(),
        }
    }
}

impl ReadForMeConfig {
    /// Get the config file path: ~/.config/cli-programs/read-for-me.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join(".config")
            .join("cli-programs")
            .join("read-for-me.toml"))
    }

    /// Load config from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, returning defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ReadForMeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        // The [provider] table may hold an API key or token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            anyhow::bail!("chunk_size must be greater than zero");
        }
        Ok(())
    }

    /// Voice parameters described by this config
    pub fn voice(&self) -> VoiceParams {
        VoiceParams::new()
            .with_gender(VoiceGender::from_name(&self.gender))
            .with_speaking_rate(self.speed)
            .with_pitch(self.pitch)
            .with_language_code(self.language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ReadForMeConfig::default();
        assert_eq!(config.gender, "male");
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.pitch, 0.0);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.output_dir, PathBuf::from("audio_files"));
        assert_eq!(config.chunk_size, 4500);
        assert!(config.provider.api_key.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = ReadForMeConfig::config_path().unwrap();
        assert!(path.ends_with("cli-programs/read-for-me.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
gender = "female"
speed = 1.1
pitch = -1.5
output_dir = "/tmp/audio"
chunk_size = 3000

[provider]
api_key = "key"
"#;
        let config: ReadForMeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gender, "female");
        assert_eq!(config.speed, 1.1);
        assert_eq!(config.pitch, -1.5);
        assert_eq!(config.language, "en-US");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/audio"));
        assert_eq!(config.chunk_size, 3000);
        assert_eq!(config.provider.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ReadForMeConfig = toml::from_str("").unwrap();
        assert_eq!(config.gender, "male");
        assert_eq!(config.chunk_size, 4500);
    }

    #[test]
    fn test_voice_from_config_keeps_speed() {
        let config = ReadForMeConfig {
            gender: "robot".to_string(),
            speed: 9.0,
            ..Default::default()
        };
        let voice = config.voice();
        assert_eq!(voice.gender, VoiceGender::Male);
        assert_eq!(voice.speaking_rate, 9.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("read-for-me.toml");

        let config = ReadForMeConfig {
            gender: "neutral".to_string(),
            chunk_size: 1200,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = ReadForMeConfig::load_from(&path).unwrap();
        assert_eq!(loaded.gender, "neutral");
        assert_eq!(loaded.chunk_size, 1200);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_config_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("read-for-me.toml");
        let config = ReadForMeConfig {
            provider: ProviderConfig {
                api_key: Some("secret".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ReadForMeConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.chunk_size, 4500);
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("read-for-me.toml");
        fs::write(&path, "chunk_size = 0\n").unwrap();
        assert!(ReadForMeConfig::load_from(&path).is_err());
    }
}
