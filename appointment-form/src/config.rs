use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FormConfig {
    /// Delay of the simulated submission
    pub submit_delay_ms: u64,
    pub submit_label: String,
    /// Label shown on the disabled submit control while a submission is pending
    pub busy_label: String,
    pub success_message: String,
    pub error_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            submit_label: "Book appointment".to_string(),
            busy_label: "Sending...".to_string(),
            success_message: "Appointment request sent! We will contact you soon.".to_string(),
            error_message: "Could not send your request. Please try again.".to_string(),
        }
    }
}

impl FormConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Loads the config from the default location, writing the defaults
    /// there on first run
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        if !config_path.exists() {
            write_default_config(&config_path)?;
        }

        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Message(format!(
                "Config file not found at {}",
                path.display()
            )));
        }

        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    let default_config = toml::to_string_pretty(&FormConfig::default())
        .map_err(|e| ConfigError::Message(format!("Failed to serialize default config: {e}")))?;

    std::fs::write(config_path, default_config)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("studio-site").join("form.toml")
    } else {
        PathBuf::from("form.toml")
    }
}
