use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub schedule: ScheduleDefaults,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub tournaments_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            tournaments_dir: "tournaments".to_string(),
        }
    }
}

/// Used when the command line or an API request leaves courts/rounds out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDefaults {
    pub courts: u32,
    pub rounds: u32,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        ScheduleDefaults { courts: 2, rounds: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "doubles_scheduler=info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| AppError::Config {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the given file, or falls back to defaults when none is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.schedule.courts < 1 || self.schedule.rounds < 1 {
            return Err(AppError::Config {
                message: "schedule.courts and schedule.rounds must be at least 1".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(AppError::Config {
                message: "server.port must not be 0".to_string(),
            });
        }
        if self.storage.tournaments_dir.trim().is_empty() {
            return Err(AppError::Config {
                message: "storage.tournaments_dir must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str("[schedule]\ncourts = 3\n").unwrap();
        assert_eq!(config.schedule.courts, 3);
        assert_eq!(config.schedule.rounds, 5);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.tournaments_dir, "tournaments");
    }

    #[test]
    fn load_rejects_zero_courts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[schedule]\ncourts = 0\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(AppError::Config { .. })));
    }

    #[test]
    fn load_reports_bad_toml_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(AppError::Config { .. })));
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
