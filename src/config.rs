//! Layered probe configuration.
//!
//! A [`Config`] is assembled once at startup from explicit layers, lowest to
//! highest precedence: built-in defaults, a local `.env` file, process
//! environment variables (`SCOUT_*`), and CLI flags. The discovery logic
//! receives the finished struct by value and never reads the environment
//! itself.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL_HINT: &str = "llama3";
pub const DEFAULT_TITLE: &str = "Local Assistant";
pub const DEFAULT_MODEL_NAME: &str = "LLama3";
pub const DEFAULT_TIMEOUT_SECS: f64 = 3.0;

/// Fully resolved probe configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_key: String,
    pub model_hint: String,
    pub title: String,
    pub model_name: String,
    pub timeout_secs: f64,
    pub debug: bool,
}

impl Config {
    /// Per-request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }
}

/// Optional per-field overrides supplied by CLI flags.
///
/// Every field is optional so the API key may be satisfied by any layer;
/// requiredness is enforced during resolution, before any network activity.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub model_hint: Option<String>,
    pub title: Option<String>,
    pub model_name: Option<String>,
    pub timeout_secs: Option<f64>,
    pub debug: Option<bool>,
}

/// Load configuration from `.env`, the environment, and CLI overrides.
pub fn load_config(overrides: Overrides) -> Result<Config, ConfigError> {
    load_config_from_sources(
        overrides,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
    )
}

pub(crate) fn load_config_from_sources<FRead, FEnv>(
    overrides: Overrides,
    read_file: FRead,
    env_lookup: FEnv,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
{
    let file_vars = match read_file(Path::new(".env")) {
        Ok(text) => parse_env_file(&text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
        Err(e) => return Err(ConfigError::Io(e)),
    };
    // Process environment wins over the .env file for the same key.
    let lookup = |name: &str| env_lookup(name).or_else(|| file_vars.get(name).cloned());

    let host = overrides
        .host
        .or_else(|| lookup("SCOUT_HOST"))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match overrides.port {
        Some(port) => port,
        None => match lookup("SCOUT_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "invalid SCOUT_PORT value `{raw}`: expected a port number"
                ))
            })?,
            None => DEFAULT_PORT,
        },
    };

    let api_key = overrides
        .api_key
        .or_else(|| lookup("SCOUT_API_KEY"))
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            ConfigError::Invalid(
                "no API key configured: pass --api-key or set SCOUT_API_KEY".to_string(),
            )
        })?;

    let model_hint = overrides
        .model_hint
        .or_else(|| lookup("SCOUT_MODEL_HINT"))
        .unwrap_or_else(|| DEFAULT_MODEL_HINT.to_string());

    let title = overrides
        .title
        .or_else(|| lookup("SCOUT_TITLE"))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let model_name = overrides
        .model_name
        .or_else(|| lookup("SCOUT_MODEL_NAME"))
        .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string());

    let timeout_secs = match overrides.timeout_secs {
        Some(timeout) => timeout,
        None => match lookup("SCOUT_TIMEOUT") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                ConfigError::Invalid(format!(
                    "invalid SCOUT_TIMEOUT value `{raw}`: expected seconds as a decimal number"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        },
    };
    if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "timeout must be a positive number of seconds, got `{timeout_secs}`"
        )));
    }

    let debug = match overrides.debug {
        Some(debug) => debug,
        None => lookup("SCOUT_DEBUG").map(|raw| truthy(&raw)).unwrap_or(false),
    };

    Ok(Config {
        host,
        port,
        api_key,
        model_hint,
        title,
        model_name,
        timeout_secs,
        debug,
    })
}

/// Parse `.env`-style text: `KEY=VALUE` lines, `#` comments, blanks skipped.
/// First occurrence wins for duplicate keys.
fn parse_env_file(text: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        vars.entry(key.trim().to_string())
            .or_insert_with(|| value.trim().to_string());
    }
    vars
}

/// Truthy values accepted for SCOUT_DEBUG: `true`, `1`, `yes`, `on`.
pub fn truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
