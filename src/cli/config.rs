//! EMTP configuration file handling
//!
//! Provides default configuration generation and loading for the `emtp`
//! CLI. Configuration files are TOML.
//!
//! ## Operator vs Protocol Settings
//!
//! This file contains OPERATOR configuration only: where keys come from,
//! the default phone country, logging. The protocol tables (honorifics,
//! suffixes, street abbreviations, domain prefix, tuple cap) are fixed by
//! the protocol revision and cannot be changed here; changing them would
//! silently break matching against every other party.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "info";

/// Default environment variable holding comma-separated key entries
const DEFAULT_KEY_ENV_VAR: &str = "EMTP_KEYS";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file '{0}' already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

/// EMTP operator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmtpConfig {
    /// Pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Key material sources
    #[serde(default)]
    pub keys: KeysConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Country assumed for phone numbers without a calling code.
    /// Only "US" numbering rules are defined.
    #[serde(default = "default_country")]
    pub default_country: String,
}

/// Key source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeysConfig {
    /// File with one `hex:` or `b64:` prefixed key per line
    pub key_file: Option<PathBuf>,

    /// Environment variable with comma-separated prefixed keys
    #[serde(default = "default_key_env_var")]
    pub env_var: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_country() -> String {
    emtp::normalize::phone::DEFAULT_COUNTRY.to_string()
}

fn default_key_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            key_file: None,
            env_var: default_key_env_var(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl EmtpConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        write_creating_parent(path, &contents)
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml() -> String {
        format!(
            r#"# EMTP Configuration (Operator Settings)
#
# Normalization tables, the domain separation prefix and the tuple cap are
# fixed by the protocol revision (EMTP|v1|) and are NOT configurable here.

[pipeline]
# Country assumed for phone numbers without a calling code.
# Only US numbering rules are defined.
default_country = "{country}"

[keys]
# File with one key per line, prefixed "hex:" or "b64:"; '#' starts a comment
# key_file = "/etc/emtp/keys.txt"

# Environment variable with comma-separated prefixed keys
env_var = "{env_var}"

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides)
level = "{level}"
"#,
            country = default_country(),
            env_var = DEFAULT_KEY_ENV_VAR,
            level = DEFAULT_LOG_LEVEL,
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(config_path: &Path, force: bool) -> Result<(), ConfigError> {
        if config_path.exists() && !force {
            return Err(ConfigError::AlreadyExists(config_path.to_path_buf()));
        }
        write_creating_parent(config_path, &Self::generate_default_toml())
    }
}

fn write_creating_parent(path: &Path, contents: &str) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

/// Get the default config file path
///
/// - Linux: ~/.config/emtp/config.toml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("emtp")
        .join("config.toml")
}
