use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Default cap on the size of a request payload (1 MiB)
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 1024 * 1024;
/// Largest cap a user may configure (16 MiB)
pub const MAX_REQUEST_BYTES_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid output format: {0}. Allowed values: text, json")]
    InvalidFormat(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to read config file at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    format: Option<String>,
    max_request_bytes: Option<usize>,
}

/// Resolved command settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub max_request_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

/// Resolve settings from CLI flags (or their env fallbacks), then the
/// config file, then defaults
pub fn resolve_settings(
    format_flag: Option<&str>,
    max_bytes_flag: Option<usize>,
    config_path: Option<&Path>,
) -> Result<Settings, ConfigError> {
    let file = match config_path {
        Some(path) if path.exists() => load_config_file(path)?,
        _ => ConfigFile::default(),
    };

    // 1. CLI flag / environment, 2. config file, 3. default
    let format = match format_flag.or(file.format.as_deref()) {
        Some(s) => s.parse::<OutputFormat>()?,
        None => OutputFormat::default(),
    };

    let max_request_bytes = max_bytes_flag
        .or(file.max_request_bytes)
        .unwrap_or(DEFAULT_MAX_REQUEST_BYTES);

    if !(1..=MAX_REQUEST_BYTES_LIMIT).contains(&max_request_bytes) {
        return Err(ConfigError::InvalidConfig(format!(
            "max_request_bytes must be between 1 and {} (got {})",
            MAX_REQUEST_BYTES_LIMIT, max_request_bytes
        )));
    }

    debug!(
        format = %format,
        max_request_bytes,
        "Settings resolved"
    );

    Ok(Settings {
        format,
        max_request_bytes,
    })
}

fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|e| {
        ConfigError::InvalidConfig(format!("Failed to parse {:?}: {}", path, e))
    })
}

/// Default location of the user config file
pub fn config_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".bookkeeper.toml");
        p
    })
}
