//! Configuration management for mdsplit.
//!
//! Parses `mdsplit.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `server.host` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! A host without any `${` is used verbatim. Once a braced reference is
//! present, bare `$VAR` references in the same value expand as well.
//!
//! ## Example
//!
//! ```toml
//! [server]
//! host = "${MDSPLIT_HOST:-127.0.0.1}"
//! port = 8080
//! mcp_path = "/server/mcp"
//! max_body_bytes = 10485760
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdsplit.toml";

/// Routes owned by the server that the tool endpoint must not shadow.
const RESERVED_ROUTES: &[&str] = &["/api/split"];

/// Characters the router treats as path parameters or wildcards.
const ROUTE_SYNTAX: &[char] = &[':', '*', '{', '}'];

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Route of the JSON-RPC tool endpoint.
    pub mcp_path: String,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            mcp_path: "/server/mcp".to_owned(),
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`MDSPLIT_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdsplit.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let start = std::env::current_dir().ok()?;
        Self::discover_from(&start)
    }

    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.server.host = expand_host(&config.server.host)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 asks the OS for a random port, which is never what a
        // config file means.
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".to_owned()));
        }

        validate_mcp_path(&self.server.mcp_path)?;

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_body_bytes must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }
}

fn validate_mcp_path(path: &str) -> Result<(), ConfigError> {
    if !path.starts_with('/') {
        return Err(ConfigError::Validation("server.mcp_path must start with /".to_owned()));
    }
    if RESERVED_ROUTES.contains(&path) {
        return Err(ConfigError::Validation(format!(
            "server.mcp_path {path} is already served by mdsplit"
        )));
    }
    if path.contains(ROUTE_SYNTAX) {
        return Err(ConfigError::Validation(format!(
            "server.mcp_path {path} must be a literal path without ':', '*', '{{' or '}}'"
        )));
    }
    Ok(())
}

/// Expand `${VAR}` and `${VAR:-default}` references in `server.host`.
fn expand_host(host: &str) -> Result<String, ConfigError> {
    if !host.contains("${") {
        return Ok(host.to_owned());
    }

    shellexpand::env_with_context(host, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: "server.host".to_owned(),
            message: format!("${{{}}}: {}", e.var_name, e.cause),
        })
}
