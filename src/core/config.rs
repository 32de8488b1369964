//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.cloudnav/config.toml`. The file is only ever read;
//! a missing file is the same as an empty one.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CloudnavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub workspace: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub host: Option<String>,
    pub api_key: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_HOST: &str = "https://api.render.com/v1";
pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_LOG_FILE: &str = "cloudnav.log";

// ============================================================================
// Resolved Config (concrete values where a default exists)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub host: String,
    pub api_key: Option<String>,
    pub workspace: Option<String>,
    pub log_level: String,
    pub log_file: String,
}

/// Values supplied on the command line. `None` = flag not given.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub workspace: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.cloudnav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".cloudnav").join("config.toml"))
}

/// Load config from `path`, or from `~/.cloudnav/config.toml` when `None`.
///
/// A missing file yields `CloudnavConfig::default()`. A malformed one
/// returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<CloudnavConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CloudnavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(CloudnavConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: CloudnavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // api_key deliberately left out of the log line
    debug!(
        "Config: host={:?} workspace={:?}",
        config.api.host, config.general.workspace
    );
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CloudnavConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Host: env → config → default
    let host = std::env::var("CLOUDNAV_HOST")
        .ok()
        .or_else(|| config.api.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    // API key: env → config
    let api_key = std::env::var("CLOUDNAV_API_KEY")
        .ok()
        .or_else(|| config.api.api_key.clone());

    // Workspace: CLI → env → config
    let workspace = cli
        .workspace
        .map(str::to_string)
        .or_else(|| std::env::var("CLOUDNAV_WORKSPACE").ok())
        .or_else(|| config.general.workspace.clone());

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .map(str::to_string)
        .or_else(|| std::env::var("CLOUDNAV_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    ResolvedConfig {
        host,
        api_key,
        workspace,
        log_level,
        log_file: config
            .general
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
    }
}
