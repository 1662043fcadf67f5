/// Application configuration
use crate::error::{CliError, Result};
use encore_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read when present in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "encore.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Used when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            player: PlayerConfig::default(),
            logging: default_logging(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `encore.toml`; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. ENCORE_STORAGE__DATA_DIR
        settings = settings.add_source(
            config::Environment::with_prefix("ENCORE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(CliError::Config("storage.data_dir must not be empty".to_string()));
        }

        if self.player.favorites_key.is_empty() {
            return Err(CliError::Config(
                "player.favorites_key must not be empty".to_string(),
            ));
        }

        if self.player.command_buffer == 0 || self.player.event_buffer == 0 {
            return Err(CliError::Config(
                "player.command_buffer and player.event_buffer must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "encore=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.player.favorites_key, "favoriteTracks");
        assert_eq!(config.logging.filter, "encore=info");
        config.validate().unwrap();
    }

    #[test]
    fn zero_buffers_are_rejected() {
        let mut config = AppConfig::default();
        config.player.event_buffer = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut config = AppConfig::default();
        config.player.favorites_key.clear();
        assert!(config.validate().is_err());
    }
}
