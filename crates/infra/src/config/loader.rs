//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `CAPTAIN_BASE_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CAPTAIN_BASE_URL`: API base URL (required)
//! - `CAPTAIN_PASSWORD`: Password used for re-authentication
//! - `CAPTAIN_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `CAPTAIN_USER_AGENT`: User agent sent with every request
//! - `CAPTAIN_ON_DESTROY`: `abandon` or `cancel`
//! - `CAPTAIN_SIMULATED_LATENCY_MS`: Artificial delay before each call
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./captain.json` or `./captain.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use captain_domain::{CaptainError, ClientConfig, DestroyPolicy, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["captain.json", "captain.toml", "config.json", "config.toml"];
const PROBE_DIRS: [&str; 3] = [".", "..", "../.."];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL is
/// not set there, falls back to loading from a config file.
///
/// # Errors
/// Returns `CaptainError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `CAPTAIN_BASE_URL` is required; every other setting keeps its
/// default when unset.
///
/// # Errors
/// Returns `CaptainError::Config` if the base URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var("CAPTAIN_BASE_URL")?);

    if let Some(password) = env_opt("CAPTAIN_PASSWORD") {
        config.password = password;
    }
    if let Some(timeout) = env_parse::<u64>("CAPTAIN_TIMEOUT_SECS", "timeout")? {
        config.timeout_secs = timeout;
    }
    if let Some(agent) = env_opt("CAPTAIN_USER_AGENT") {
        config.user_agent = agent;
    }
    if let Some(policy) = env_parse::<DestroyPolicy>("CAPTAIN_ON_DESTROY", "destroy policy")? {
        config.on_destroy = policy;
    }
    if let Some(latency) = env_parse::<u64>("CAPTAIN_SIMULATED_LATENCY_MS", "simulated latency")? {
        config.simulated_latency_ms = latency;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CaptainError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid or the configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CaptainError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CaptainError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CaptainError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CaptainError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CaptainError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CaptainError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent directories (up to 2
/// levels) and the same locations relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| {
            PROBE_DIRS.iter().flat_map(move |dir| {
                CONFIG_FILE_NAMES.iter().map(move |name| root.join(dir).join(name))
            })
        })
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `CaptainError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        CaptainError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional, non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `CaptainError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| CaptainError::Config(format!("Invalid {} in {}: {}", what, key, e)))
        })
        .transpose()
}
