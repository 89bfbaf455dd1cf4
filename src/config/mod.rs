use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::state::Page;
use crate::task::DEFAULT_DELAY;
use crate::theme::Theme;

/// Upper bound for the artificial analysis delay
pub const MAX_DELAY_MS: u64 = 60_000;

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY.as_millis() as u64
}

fn default_plan_label() -> String {
    "Demo".to_string()
}

/// Optional color overrides, as hex strings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>, // Brand color: logo, active tab, primary button
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>, // Secondary button
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Artificial latency of the simulated analyses, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Label on the plan badge in the header
    #[serde(default = "default_plan_label")]
    pub plan_label: String,

    /// Page shown at startup
    #[serde(default)]
    pub start_page: Page,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            plan_label: default_plan_label(),
            start_page: Page::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("nichelens");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Directory the TUI writes its daily log files to
    pub fn log_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nichelens").join("logs"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::from_toml(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                        return Ok(AppConfig::default());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config: {}", e);
                    return Ok(AppConfig::default());
                }
            }
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::DelayTooLong(self.delay_ms));
        }
        if self.plan_label.trim().is_empty() {
            return Err(ConfigError::EmptyPlanLabel);
        }
        Theme::from_config(&self.theme)?;
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            delay_ms: 300,
            plan_label: "Pro".to_string(),
            start_page: Page::Competitor,
            theme: ThemeConfig {
                accent: Some("#ff00aa".to_string()),
                ..ThemeConfig::default()
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();

        assert_eq!(config, deserialized);
        assert!(serialized.contains("start_page = \"competitor\""));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.delay(), Duration::from_millis(1200));
        assert_eq!(config.plan_label, "Demo");
        assert_eq!(config.start_page, Page::Optimizer);
    }

    #[test]
    fn test_validation_errors() {
        let err = AppConfig::from_toml("delay_ms = 60001").unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::DelayTooLong(60_001))
        );

        let err = AppConfig::from_toml("plan_label = \"  \"").unwrap_err();
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::EmptyPlanLabel));

        let err = AppConfig::from_toml("[theme]\naccent = \"pink\"").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidColor { field: "accent", .. })
        ));
    }

    #[test]
    fn test_log_dir_sits_next_to_config() {
        if let Some(dir) = AppConfig::log_dir() {
            assert!(dir.ends_with("nichelens/logs"));
        }
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        assert!(AppConfig::from_toml("start_page = \"checkout\"").is_err());
    }
}
