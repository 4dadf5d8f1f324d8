//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Inline style of the `<mark>` tag used by the original screening portal.
pub const DEFAULT_MARK_STYLE: &str =
    "background:#fee2e2; padding:0.1rem 0.2rem; border-radius:0.2rem;";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub highlight: HighlightConfig,
    pub language_model: LanguageModelConfig,
    pub screening: ScreeningConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    pub marker: MarkerStyle,
    pub html_style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    Html,
    Markdown,
    Ansi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageModelConfig {
    /// Optional TOML file of `word = "POS"` overrides for the tagger lexicon.
    pub lexicon_path: Option<PathBuf>,
    /// Terms shorter than this many characters are never reported as skills.
    pub min_term_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub pass_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight: HighlightConfig {
                marker: MarkerStyle::Html,
                html_style: DEFAULT_MARK_STYLE.to_string(),
            },
            language_model: LanguageModelConfig {
                lexicon_path: None,
                min_term_length: 2,
            },
            screening: ScreeningConfig {
                pass_threshold: 50.0,
            },
            storage: StorageConfig {
                upload_dir: PathBuf::from("uploaded_resumes"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.screening.pass_threshold) {
            return Err(ScreenerError::Configuration(format!(
                "screening.pass_threshold must be within 0..=100, got {}",
                self.screening.pass_threshold
            )));
        }
        if self.language_model.min_term_length == 0 {
            return Err(ScreenerError::Configuration(
                "language_model.min_term_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.highlight.marker, MarkerStyle::Html);
        assert_eq!(config.language_model.min_term_length, 2);
    }

    #[test]
    fn test_round_trip_keeps_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.highlight.marker = MarkerStyle::Markdown;
        config.screening.pass_threshold = 75.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.highlight.marker, MarkerStyle::Markdown);
        assert_eq!(loaded.screening.pass_threshold, 75.0);
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.screening.pass_threshold = 140.0;
        config.save_to(&path).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ScreenerError::Configuration(_))
        ));
    }
}
