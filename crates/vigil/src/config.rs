//! Configuration loading and validation for the Vigil engine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use validator::{Validate, ValidationError};

// Re-export Validate trait for derive macro
#[allow(unused_imports)]
use validator::Validate as _;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduling: SchedulingSettings,

    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub gateway: GatewaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), validator::ValidationErrors> {
        self.scheduling.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

/// The two process-wide cycle intervals.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SchedulingSettings {
    #[serde(with = "humantime_serde")]
    #[validate(custom = "validate_probe_interval")]
    pub probe_interval: Duration,

    #[serde(with = "humantime_serde")]
    #[validate(custom = "validate_rotation_interval")]
    pub rotation_interval: Duration,
}

/// On-disk locations for records and audit logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

/// Notification gateway settings. Credentials are injected here, never owned
/// by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GatewaySettings {
    #[validate(length(min = 1))]
    pub endpoint: String,

    #[validate(length(min = 1))]
    pub sender: String,

    pub account: String,

    pub token: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
}

// Default implementations

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(60),
            rotation_interval: Duration::from_secs(60 * 60 * 24),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./.data"),
            logs_dir: PathBuf::from("./.logs"),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/alerts".to_string(),
            sender: "+15005550006".to_string(),
            account: String::new(),
            token: String::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: None,
            format: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduling: SchedulingSettings::default(),
            paths: PathSettings::default(),
            gateway: GatewaySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

// Custom validators

fn validate_probe_interval(interval: &Duration) -> Result<(), ValidationError> {
    let secs = interval.as_secs();
    if !(1..=3600).contains(&secs) {
        return Err(ValidationError::new("probe_interval_out_of_range"));
    }
    Ok(())
}

fn validate_rotation_interval(interval: &Duration) -> Result<(), ValidationError> {
    let secs = interval.as_secs();
    if !(60..=60 * 60 * 24 * 7).contains(&secs) {
        return Err(ValidationError::new("rotation_interval_out_of_range"));
    }
    Ok(())
}

// Configuration loading implementation

impl Config {
    /// Load configuration from default search paths
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                tracing::info!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut paths = vec![PathBuf::from("/etc/vigil/vigil.yaml")];

        if let Some(home_path) = Self::home_config_path() {
            paths.push(home_path);
        }

        paths.push(PathBuf::from("./vigil.yaml"));

        paths
            .into_iter()
            .find(|p: &PathBuf| p.exists() && p.is_file())
    }

    /// Get home directory config path
    fn home_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/vigil/vigil.yaml"))
    }
}
