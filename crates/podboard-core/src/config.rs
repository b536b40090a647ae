//! TOML-based application configuration.
//!
//! Stores the pod catalog and the operating-hours window. Defaults reproduce
//! the fixed setup (POD-A/B/C with four seats, open 08:00-20:00), so a missing
//! or partial file still yields a working session. Bookings themselves are
//! never persisted here; a session is in-memory only.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Pod, PodCatalog, DEFAULT_CAPACITY};
use crate::error::ConfigError;

/// Operating-hours window, half-open: a slot at `close_hour` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursConfig {
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
}

impl HoursConfig {
    /// Whether a slot starting at `hour` falls inside the window.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.open_hour && hour < self.close_hour
    }
}

impl Default for HoursConfig {
    fn default() -> Self {
        Self {
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
        }
    }
}

/// One pod entry in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodConfig {
    pub id: String,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hours: HoursConfig,
    #[serde(default = "default_pods")]
    pub pods: Vec<PodConfig>,
}

// Default functions
fn default_open_hour() -> u32 {
    8
}
fn default_close_hour() -> u32 {
    20
}
fn default_capacity() -> u32 {
    DEFAULT_CAPACITY
}
fn default_pods() -> Vec<PodConfig> {
    PodCatalog::default()
        .pods()
        .iter()
        .map(|p| PodConfig {
            id: p.id.clone(),
            capacity: p.capacity,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hours: HoursConfig::default(),
            pods: default_pods(),
        }
    }
}

impl Config {
    /// Load a config from `path`, parse errors included, and validate it.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists and parses; otherwise fall back to the
    /// built-in defaults.
    pub fn load_or_default(path: &Path) -> Self {
        Self::from_path(path).unwrap_or_default()
    }

    /// Write the config back out as TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pods.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "pods".to_string(),
                message: "catalog must list at least one pod".to_string(),
            });
        }
        if self.hours.open_hour >= self.hours.close_hour || self.hours.close_hour > 24 {
            return Err(ConfigError::InvalidValue {
                key: "hours".to_string(),
                message: format!(
                    "open_hour ({}) must be before close_hour ({}), close_hour at most 24",
                    self.hours.open_hour, self.hours.close_hour
                ),
            });
        }
        for pod in &self.pods {
            if pod.capacity == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("pods.{}", pod.id),
                    message: "capacity must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Materialize the catalog described by this config.
    pub fn catalog(&self) -> PodCatalog {
        PodCatalog::new(
            self.pods
                .iter()
                .map(|p| Pod::new(p.id.clone(), p.capacity))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_setup() {
        let config = Config::default();
        assert_eq!(config.hours.open_hour, 8);
        assert_eq!(config.hours.close_hour, 20);
        assert_eq!(config.pods.len(), 3);
        assert!(config.pods.iter().all(|p| p.capacity == 4));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [[pods]]
            id = "POD-X"
            "#,
        )
        .unwrap();
        assert_eq!(config.pods[0].capacity, 4);
        assert_eq!(config.hours, HoursConfig::default());
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("podboard.toml");

        let mut config = Config::default();
        config.hours.close_hour = 22;
        config.save(&path).unwrap();

        let loaded = Config::from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn inverted_hours_rejected() {
        let result: Result<(), ConfigError> = Config {
            hours: HoursConfig {
                open_hour: 20,
                close_hour: 8,
            },
            ..Config::default()
        }
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml"));
        assert_eq!(config, Config::default());
    }
}
