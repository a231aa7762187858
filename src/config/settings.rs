//! Configuration settings for Avskrift.

use crate::error::{AvskriftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub embedding: EmbeddingSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory the dataset files are written to.
    pub data_dir: String,
    /// Directory for per-run log files.
    pub logs_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            logs_dir: "logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Channel IDs to collect, in the order they should be processed.
    pub channel_ids: Vec<String>,
    /// Maximum videos requested per channel (the API caps this at 50).
    pub max_results: u32,
    /// YouTube Data API key. Falls back to the YOUTUBE_API_KEY environment
    /// variable when absent.
    pub api_key: Option<String>,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            channel_ids: Vec::new(),
            max_results: 50,
            api_key: None,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model, named by its fastembed model code.
    pub model: String,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "BAAI/bge-small-en-v1.5".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or the default location if None.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.data_dir)
    }

    /// Get the logs directory path.
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.general.logs_dir)
    }

    /// Resolve the YouTube API key from config or the environment.
    pub fn api_key(&self) -> Result<String> {
        if let Some(key) = &self.youtube.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        std::env::var("YOUTUBE_API_KEY").map_err(|_| {
            AvskriftError::Config(
                "No YouTube API key: set youtube.api_key in config.toml or the \
                 YOUTUBE_API_KEY environment variable"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.general.data_dir, "data");
        assert_eq!(settings.youtube.max_results, 50);
        assert!(settings.youtube.channel_ids.is_empty());
        assert_eq!(settings.embedding.model, "BAAI/bge-small-en-v1.5");
    }

    #[test]
    fn test_parse_partial_config() {
        let settings: Settings = toml::from_str(
            r#"
            [youtube]
            channel_ids = ["UCabc", "UCdef"]
            max_results = 10
            "#,
        )
        .unwrap();
        assert_eq!(settings.youtube.channel_ids, vec!["UCabc", "UCdef"]);
        assert_eq!(settings.youtube.max_results, 10);
        // untouched sections keep their defaults
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_from(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert!(settings.youtube.channel_ids.is_empty());
    }
}
