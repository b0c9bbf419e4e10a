//! Configuration loading
//!
//! Bootstrap settings come from a TOML file located in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`CHIPCHECK_CONFIG`)
//! 3. User config directory (`~/.config/chipcheck/config.toml` on Linux)
//! 4. Compiled defaults (fallback)
//!
//! A missing or unreadable file is not fatal; defaults are used and a
//! warning is logged. Individual fields can still be overridden on the
//! command line by the service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::session::Threshold;
use crate::{Error, Result};

pub const CONFIG_ENV_VAR: &str = "CHIPCHECK_CONFIG";

/// Default HTTP port for chipcheck-server
pub const DEFAULT_PORT: u16 = 5730;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum group size / name frequency
    #[serde(default)]
    pub threshold: Threshold,

    /// Sheet (JSON) to load at startup (optional)
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            threshold: Threshold::default(),
            dataset: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        if config.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".to_string()));
        }
        Ok(config)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Platform config file location (`<config dir>/chipcheck/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chipcheck").join("config.toml"))
}

/// Pick the config file to read, following the priority order above
///
/// Returns `None` when neither an explicit path nor an existing default
/// file is available.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: user config directory
    default_config_path().filter(|p| p.exists())
}

/// Resolve and load configuration, falling back to defaults
///
/// Explicit paths (CLI or env) that fail to load are reported as errors;
/// a missing default file silently yields defaults.
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let explicit = cli_arg.is_some() || std::env::var(CONFIG_ENV_VAR).map(|v| !v.is_empty()).unwrap_or(false);

    // Priority 4: compiled defaults
    let Some(path) = resolve_config_path(cli_arg) else {
        info!("No config file found, using defaults");
        return Ok(TomlConfig::default());
    };

    match TomlConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        Err(e) if explicit => Err(Error::Config(format!(
            "failed to load {}: {}",
            path.display(),
            e
        ))),
        Err(e) => {
            warn!("Ignoring config file {}: {} (using defaults)", path.display(), e);
            Ok(TomlConfig::default())
        }
    }
}
