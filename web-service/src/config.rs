//! Service configuration.
//!
//! Layered like a 12-factor app:
//! 1. Defaults (from code)
//! 2. Config file (`student-type.toml`)
//! 3. Environment variables (`STUDENT_TYPE_*`, `__` for nesting)
//!
//! Command-line flags are applied on top by the binary.

use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "STUDENT_TYPE";
pub const CONFIG_FILENAME: &str = "student-type.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Configuration file not found at path: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Root service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Trained artifact locations
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Serialized classifier
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Serialized label encoder
    #[serde(default = "default_encoder_path")]
    pub encoder_path: PathBuf,
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".to_string()
}
fn default_model_path() -> PathBuf {
    PathBuf::from("model/student_model.json")
}
fn default_encoder_path() -> PathBuf {
    PathBuf::from("model/label_encoder.json")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            encoder_path: default_encoder_path(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model: ModelConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr.parse().map_err(|e| {
            ConfigError::ValidationError(format!("bind_addr {:?}: {e}", self.bind_addr))
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.model.model_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.model_path must not be empty".to_string(),
            ));
        }
        if self.model.encoder_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.encoder_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loader with layered merging support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration with layered merging:
    /// 1. Start with defaults (from Default implementations)
    /// 2. Merge config file if provided
    /// 3. Override with environment variables (STUDENT_TYPE_ prefix)
    pub fn load(&self) -> Result<ServiceConfig> {
        let mut builder = Config::builder();

        let defaults_json = serde_json::to_string(&ServiceConfig::default())?;
        builder = builder.add_source(File::from_str(&defaults_json, config::FileFormat::Json));

        if let Some(ref path) = self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            builder = builder.add_source(File::from(path.as_path()));
        }

        // Example: STUDENT_TYPE_MODEL__MODEL_PATH=/srv/model/student_model.json
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: ServiceConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Locate the default config file in standard locations:
    /// 1. Current directory: ./student-type.toml
    /// 2. XDG config: ~/.config/student-type/config.toml
    pub fn find_config_file() -> Option<PathBuf> {
        let cwd_config = PathBuf::from(".").join(CONFIG_FILENAME);
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("student-type").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<ServiceConfig> {
        match Self::find_config_file() {
            Some(path) => ConfigLoader::new().with_file(path).load(),
            None => ConfigLoader::new().load(),
        }
    }
}
