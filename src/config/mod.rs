//! Configuration management for studybot

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::session::SessionSettings;
use crate::theme::Theme;

/// Environment variable that overrides the service URL
pub const SERVICE_URL_ENV: &str = "STUDYBOT_SERVICE_URL";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Base URL of the plan/quiz generation service
    pub service_url: String,

    /// Seconds before a generation request is abandoned
    pub request_timeout_secs: u64,

    /// Difficulty sent with plan requests
    pub difficulty: String,

    /// Questions per generated quiz
    pub num_questions: u32,

    /// Quiz style sent with quiz requests, omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_type: Option<String>,

    /// Require a lesson list before creating a plan
    pub require_lessons: bool,

    /// Plan length used when the duration has no number in it
    pub default_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            service_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 60,
            difficulty: "medium".to_string(),
            num_questions: 5,
            quiz_type: None,
            require_lessons: false,
            default_days: 7,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Load configuration from a specific file, writing defaults if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Apply environment overrides using the given lookup
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(SERVICE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Service URL overridden by {}", SERVICE_URL_ENV);
            self.service_url = url.trim().to_string();
        }
        self
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "studybot")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "studybot").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("studybot.log"))
    }

    /// Request timeout as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Settings handed to the session controller
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            difficulty: self.difficulty.clone(),
            num_questions: self.num_questions.max(1),
            quiz_type: self.quiz_type.clone(),
            require_lessons: self.require_lessons,
            default_days: self.default_days.max(1),
        }
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        self.custom_theme.clone().or_else(|| Theme::named(&self.theme)).unwrap_or_else(|| {
            tracing::warn!("Unknown theme {:?}, using Tokyo Night", self.theme);
            Theme::tokyo_night()
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_has_tokyo_night_theme() {
        let config = Config::default();
        assert_eq!(config.theme, "Tokyo Night");
    }

    #[test]
    fn default_config_points_at_local_service() {
        let config = Config::default();
        assert_eq!(config.service_url, "http://localhost:8000");
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn config_deserializes_partial_json() {
        let json = r#"{"service_url":"https://plans.example.com","num_questions":3}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.service_url, "https://plans.example.com");
        assert_eq!(config.num_questions, 3);
        assert_eq!(config.difficulty, "medium");
    }

    #[test]
    fn quiz_type_is_omitted_when_unset() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("quiz_type"));
    }

    #[test]
    fn env_override_replaces_service_url() {
        let config = Config::default().with_env(|key| {
            (key == SERVICE_URL_ENV).then(|| " https://override.example.com ".to_string())
        });
        assert_eq!(config.service_url, "https://override.example.com");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let config = Config::default().with_env(|_| Some("  ".to_string()));
        assert_eq!(config.service_url, "http://localhost:8000");
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, "Tokyo Night");
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            service_url: "http://10.0.0.2:9000".into(),
            require_lessons: true,
            quiz_type: Some("multiple_choice".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.service_url, "http://10.0.0.2:9000");
        assert!(loaded.require_lessons);
        assert_eq!(loaded.quiz_type.as_deref(), Some("multiple_choice"));
    }

    #[test]
    fn session_settings_clamp_zero_counts() {
        let config = Config { num_questions: 0, default_days: 0, ..Config::default() };
        let settings = config.session_settings();
        assert_eq!(settings.num_questions, 1);
        assert_eq!(settings.default_days, 1);
    }
}
