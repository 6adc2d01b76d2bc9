//! Configuration management for authgate.
//!
//! Loads configuration from ${AUTHGATE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for authgate configuration.
    //!
    //! AUTHGATE_HOME resolution order:
    //! 1. AUTHGATE_HOME environment variable (if set)
    //! 2. ~/.config/authgate (default)

    use std::path::PathBuf;

    /// Returns the authgate home directory.
    pub fn authgate_home() -> PathBuf {
        if let Ok(home) = std::env::var("AUTHGATE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".authgate"),
            |h| h.join(".config").join("authgate"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        authgate_home().join("config.toml")
    }
}

/// Logging configuration (`[logging]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `AUTHGATE_LOG` is unset.
    pub level: String,
    /// Optional log file, rotated daily.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Identity provider public base URL
    pub provider_url: Option<String>,
    /// Application backend API base URL
    pub backend_url: Option<String>,
    /// Canonical entry URL of the web client (also the logout fallback)
    pub browser_url: Option<String>,
    /// Path users are held on while `password_reset` is set
    pub reset_password_path: String,
    /// Timeout applied to every outbound request
    pub request_timeout_secs: u64,
    pub logging: LoggingConfig,
}

impl Config {
    pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:4433";
    pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080/api";
    pub const DEFAULT_BROWSER_URL: &str = "http://127.0.0.1:5173/";
    const DEFAULT_RESET_PASSWORD_PATH: &str = "/reset-password";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists (no silent overwrite) or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: None,
            backend_url: None,
            browser_url: None,
            reset_password_path: Self::DEFAULT_RESET_PASSWORD_PATH.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

/// Fully resolved service URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Provider base URL without a trailing slash.
    pub provider: String,
    /// Backend base URL without a trailing slash.
    pub backend: String,
    /// Canonical entry URL, kept verbatim.
    pub browser: String,
}

impl Endpoints {
    /// Resolves every URL with precedence: env > config > default.
    ///
    /// # Errors
    /// Returns an error if a configured URL is malformed.
    pub fn resolve(config: &Config) -> Result<Self> {
        let provider = resolve_base_url(
            config.provider_url.as_deref(),
            "AUTHGATE_PROVIDER_URL",
            Config::DEFAULT_PROVIDER_URL,
            "identity provider",
        )?;
        let backend = resolve_base_url(
            config.backend_url.as_deref(),
            "AUTHGATE_BACKEND_URL",
            Config::DEFAULT_BACKEND_URL,
            "backend",
        )?;
        let browser = resolve_base_url(
            config.browser_url.as_deref(),
            "AUTHGATE_BROWSER_URL",
            Config::DEFAULT_BROWSER_URL,
            "browser",
        )?;

        Ok(Self {
            provider: provider.trim_end_matches('/').to_string(),
            backend: backend.trim_end_matches('/').to_string(),
            browser,
        })
    }
}

/// Resolves a base URL with precedence: env > config > default.
///
/// # Arguments
/// * `config_base_url` - Value from config file (if present)
/// * `env_var` - Environment variable name (e.g., "`AUTHGATE_BACKEND_URL`")
/// * `default_url` - Default URL if neither env nor config is set
/// * `service_name` - Human-readable service name for error messages
///
/// # Errors
/// Returns an error if the chosen URL does not parse.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
    service_name: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(default_url.to_string())
}

fn validate_url(url: &str, service_name: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid {service_name} base URL: {url}"))?;
    Ok(())
}
