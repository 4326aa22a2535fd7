//! API credential configuration
//!
//! Values live in a TOML file under the user config directory. The
//! `OPENAI_API_KEY` environment variable overrides the file's key, which
//! keeps real credentials out of dotfiles when desired.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Placeholder shipped in template configs; never a usable key.
const PLACEHOLDER_KEY: &str = "YOUR_API_KEY_HERE";

const ENV_API_KEY: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Path this config was loaded from
    #[serde(skip)]
    pub config_path: PathBuf,

    /// OpenAI API key (`sk-` prefixed)
    pub openai_api_key: String,

    /// Base URL for the OpenAI API
    pub api_base_url: String,

    /// Advisory cap on recording length in seconds; enforcement is the
    /// front end's job
    pub max_recording_duration: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            openai_api_key: String::new(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            max_recording_duration: 300.0,
        }
    }
}

impl ApiConfig {
    /// Load configuration from file, or create the default one.
    ///
    /// A non-empty `OPENAI_API_KEY` environment variable wins over the
    /// file value.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        let mut config = if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: ApiConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path;
            config
        } else {
            let config = Self::default();
            config.save().context("Failed to save default config")?;
            config
        };

        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.is_empty() {
                debug!("Using API key from environment");
                config.openai_api_key = key;
            }
        }

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&self.config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// True when a real key is present (non-empty and not the placeholder).
    pub fn is_configured(&self) -> bool {
        !self.openai_api_key.is_empty() && self.openai_api_key != PLACEHOLDER_KEY
    }

    /// Check that the key exists and looks like an OpenAI key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::MissingCredential);
        }
        if !self.openai_api_key.starts_with("sk-") {
            return Err(ConfigError::InvalidCredentialFormat);
        }
        Ok(())
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectern")
            .join("config.toml")
    }
}
