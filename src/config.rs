use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// API key for the OpenAI-compatible backend, shared by translation
    /// and synthesis. Usually supplied via CONVERSO_API_KEY.
    pub api_key: Option<String>,
    pub languages: LanguageConfig,
    pub translation: TranslationConfig,
    pub synthesis: SynthesisConfig,
    pub timing: TimingConfig,
}

/// Conversation language configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LanguageConfig {
    pub source: String,
    pub target: String,
}

/// Translation call configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    pub base_url: String,
    pub model: String,
}

/// Synthesis call configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    pub base_url: String,
    pub model: String,
    pub speed: f32,
}

/// Pipeline timing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub debounce_ms: u64,
    pub status_clear_ms: u64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            source: defaults::DEFAULT_SOURCE_LANGUAGE.to_string(),
            target: defaults::DEFAULT_TARGET_LANGUAGE.to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            model: defaults::DEFAULT_TRANSLATION_MODEL.to_string(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_BASE_URL.to_string(),
            model: defaults::DEFAULT_SYNTHESIS_MODEL.to_string(),
            speed: defaults::DEFAULT_SYNTHESIS_SPEED,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: defaults::DEBOUNCE_MS,
            status_clear_ms: defaults::STATUS_CLEAR_MS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Self::default()
                } else {
                    panic!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CONVERSO_API_KEY → api_key
    /// - CONVERSO_BASE_URL → translation.base_url and synthesis.base_url
    /// - CONVERSO_SOURCE_LANGUAGE → languages.source
    /// - CONVERSO_TARGET_LANGUAGE → languages.target
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("CONVERSO_API_KEY")
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }

        if let Ok(url) = std::env::var("CONVERSO_BASE_URL")
            && !url.is_empty()
        {
            self.translation.base_url = url.clone();
            self.synthesis.base_url = url;
        }

        if let Ok(source) = std::env::var("CONVERSO_SOURCE_LANGUAGE")
            && !source.is_empty()
        {
            self.languages.source = source;
        }

        if let Ok(target) = std::env::var("CONVERSO_TARGET_LANGUAGE")
            && !target.is_empty()
        {
            self.languages.target = target;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/converso/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .expect("Could not determine config directory")
            .join("converso")
            .join("config.toml")
    }
}
