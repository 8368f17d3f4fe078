//! Configuration management for run-sql.
//!
//! Handles loading the optional TOML config file and validating the RPC
//! endpoint settings. Command-line flags and environment variables are
//! layered on top by [`crate::cli`].

use crate::error::{RunnerError, Result};
use crate::script::SplitMode;
use crate::secrets::mask_secret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Script used when neither the command line nor the config file names one.
pub const DEFAULT_SCRIPT: &str = "fix-profile-creation.sql";

/// RPC function that executes raw SQL on the server.
pub const DEFAULT_FUNCTION: &str = "exec_sql";

/// Default timeout for each statement request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure, as read from the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// RPC endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointSection,

    /// Script settings.
    #[serde(default)]
    pub script: ScriptSection,
}

/// `[endpoint]` table of the config file.
#[derive(Clone, Serialize, Deserialize)]
pub struct EndpointSection {
    /// Project base URL (e.g., `https://abc.supabase.co`).
    pub url: Option<String>,

    /// API key (not recommended to store in config; prefer env or keyring).
    pub api_key: Option<String>,

    /// RPC function name.
    #[serde(default = "default_function")]
    pub function: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_function() -> String {
    DEFAULT_FUNCTION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for EndpointSection {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            function: default_function(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for EndpointSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSection")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_deref().map(mask_secret))
            .field("function", &self.function)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// `[script]` table of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScriptSection {
    /// Path of the SQL script to apply.
    pub path: Option<PathBuf>,

    /// How to split the script into statements.
    #[serde(default)]
    pub split: SplitMode,
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("run-sql")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| RunnerError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            RunnerError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}

/// Validated settings for talking to the RPC endpoint.
#[derive(Clone)]
pub struct EndpointConfig {
    base_url: Url,
    api_key: String,
    function: String,
    timeout: Duration,
}

impl EndpointConfig {
    /// Validates and builds an endpoint config.
    ///
    /// The base URL must be an absolute `http` or `https` URL. Plain `http`
    /// is accepted for local development but logged as a warning.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| RunnerError::config(format!("Invalid endpoint URL '{base_url}': {e}")))?;

        match base_url.scheme() {
            "https" => {}
            "http" => warn!("Endpoint {} is not using TLS", base_url),
            other => {
                return Err(RunnerError::config(format!(
                    "Invalid scheme '{other}'. Expected 'https' or 'http'"
                )))
            }
        }

        if base_url.host_str().is_none() {
            return Err(RunnerError::config(format!(
                "Endpoint URL '{base_url}' has no host"
            )));
        }

        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RunnerError::config("API key is empty"));
        }

        Ok(Self {
            base_url,
            api_key,
            function: default_function(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Sets the RPC function name.
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the RPC call: `{base}/rest/v1/rpc/{function}`.
    pub fn rpc_url(&self) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}/rest/v1/rpc/{}", self.function);
        Url::parse(&url).map_err(|e| RunnerError::config(format!("Invalid RPC URL '{url}': {e}")))
    }

    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &mask_secret(&self.api_key))
            .field("function", &self.function)
            .field("timeout", &self.timeout)
            .finish()
    }
}
