use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::utils::paths::get_config_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Send OS desktop notifications when a task comes due.
    #[serde(default = "default_true")]
    pub desktop_notifications: bool,

    /// Ring the terminal bell when a task comes due.
    #[serde(default = "default_true")]
    pub sound: bool,

    /// How long toasts stay in the status bar (also passed to the OS
    /// notifier as its auto-dismiss timeout, in seconds).
    #[serde(default = "default_toast_duration")]
    pub toast_duration_secs: u64,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_toast_duration() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            desktop_notifications: true,
            sound: true,
            toast_duration_secs: default_toast_duration(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert!(config.desktop_notifications);
        assert!(config.sound);
        assert_eq!(config.toast_duration_secs, 3);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("desktop_notifications"));
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        let toml_str = r#"
        theme = "dark"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert!(config.sound);
    }

    #[test]
    fn test_config_disable_channels() {
        let toml_str = r#"
        desktop_notifications = false
        sound = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(!config.desktop_notifications);
        assert!(!config.sound);
    }
}
