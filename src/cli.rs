//! Command-line argument parsing for run-sql.
//!
//! Uses clap; the endpoint URL and API key can also come from the
//! `SUPABASE_URL` and `SUPABASE_KEY` environment variables (a `.env` file is
//! loaded at startup).

use crate::config::{Config, EndpointConfig, DEFAULT_SCRIPT};
use crate::error::{RunnerError, Result};
use crate::script::SplitMode;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Apply a SQL script statement by statement through a database RPC endpoint.
#[derive(Parser, Debug)]
#[command(name = "run-sql")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQL script to apply [default: fix-profile-creation.sql]
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Project base URL (e.g., https://abc.supabase.co)
    #[arg(short = 'u', long, value_name = "URL", env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// API key, sent as `apikey` and as the bearer token
    #[arg(
        short = 'k',
        long,
        value_name = "KEY",
        env = "SUPABASE_KEY",
        hide_env_values = true
    )]
    pub key: Option<String>,

    /// RPC function that executes SQL [default: exec_sql]
    #[arg(long, value_name = "NAME")]
    pub function: Option<String>,

    /// Per-statement request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Statement splitting: "statement" (quote and comment aware) or "naive"
    #[arg(long, value_name = "MODE")]
    pub split: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// List the statements that would be executed without sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Save the API key in the OS keyring for this project
    #[arg(long)]
    pub remember_key: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Settings for one run after merging CLI, environment and config file.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub script: PathBuf,
    pub split: SplitMode,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub function: String,
    pub timeout: Duration,
    pub dry_run: bool,
    pub remember_key: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Merges CLI arguments over the config file.
    ///
    /// Precedence: CLI/env > config file > defaults.
    pub fn resolve(&self, config: &Config) -> Result<RunSettings> {
        let split = match &self.split {
            Some(mode) => mode.parse::<SplitMode>().map_err(RunnerError::config)?,
            None => config.script.split,
        };

        let timeout_secs = self.timeout.unwrap_or(config.endpoint.timeout_secs);
        if timeout_secs == 0 {
            return Err(RunnerError::config("Timeout must be at least 1 second"));
        }

        let script = self
            .script
            .clone()
            .or_else(|| config.script.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT));

        Ok(RunSettings {
            script,
            split,
            url: self.url.clone().or_else(|| config.endpoint.url.clone()),
            api_key: self.key.clone().or_else(|| config.endpoint.api_key.clone()),
            function: self
                .function
                .clone()
                .unwrap_or_else(|| config.endpoint.function.clone()),
            timeout: Duration::from_secs(timeout_secs),
            dry_run: self.dry_run,
            remember_key: self.remember_key,
        })
    }
}

impl RunSettings {
    /// Builds the validated endpoint config.
    ///
    /// `stored_key` is asked for a key by project host only when neither the
    /// command line, the environment nor the config file supplied one.
    pub fn endpoint(&self, stored_key: impl FnOnce(&str) -> Option<String>) -> Result<EndpointConfig> {
        let url = self.url.as_deref().ok_or_else(|| {
            RunnerError::config(
                "No endpoint URL. Pass --url, set SUPABASE_URL, or set [endpoint].url in the config file",
            )
        })?;

        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                let host = Url::parse(url.trim())
                    .ok()
                    .and_then(|u| u.host_str().map(String::from))
                    .unwrap_or_default();
                stored_key(&host).ok_or_else(|| {
                    RunnerError::config(format!(
                        "No API key for {host}. Pass --key, set SUPABASE_KEY, or store one with --remember-key"
                    ))
                })?
            }
        };

        Ok(EndpointConfig::new(url, api_key)?
            .with_function(self.function.clone())
            .with_timeout(self.timeout))
    }
}
