//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files, environment variables, and CLI arguments.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{batching, env_vars, scheduling, timeouts};
use crate::core::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Timeout in seconds for each reachability probe
    pub timeout: Option<u64>,

    /// Number of stations validated concurrently per batch
    pub batch_size: Option<usize>,

    /// Settling delay between batches in milliseconds
    pub batch_delay: Option<u64>,

    /// Minutes between recurring fleet validation passes
    pub check_interval: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Skip SSL certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Base URL of the station REST API
    pub api_url: Option<String>,

    /// Service credential sent with station store requests
    pub api_key: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_PROBE_TIMEOUT_SECONDS),
            batch_size: Some(batching::DEFAULT_BATCH_SIZE),
            batch_delay: Some(timeouts::DEFAULT_BATCH_DELAY_MS),
            check_interval: Some(scheduling::DEFAULT_CHECK_INTERVAL_MINUTES),
            user_agent: None,
            skip_ssl_verification: Some(false),
            proxy: None,
            api_url: None,
            api_key: None,
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            crate::core::error::StreamsUpError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            crate::core::error::StreamsUpError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        // Validate the loaded configuration
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .streamsup.toml in current directory
        if let Ok(config) = Self::load_from_file(".streamsup.toml") {
            return config;
        }

        // Check for .streamsup.toml in parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}.streamsup.toml", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        // Fall back to defaults
        Self::default()
    }

    /// Layer the station store endpoint and credential from the environment.
    ///
    /// Environment values override file values but lose to CLI flags, which
    /// are merged afterwards.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_url) = env::var(env_vars::API_URL)
            && !api_url.trim().is_empty()
        {
            self.api_url = Some(api_url.trim().to_string());
        }
        if let Ok(api_key) = env::var(env_vars::API_KEY)
            && !api_key.trim().is_empty()
        {
            self.api_key = Some(api_key.trim().to_string());
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Validation options
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(batch_size) = cli_config.batch_size {
            self.batch_size = Some(batch_size);
        }
        if let Some(batch_delay) = cli_config.batch_delay {
            self.batch_delay = Some(batch_delay);
        }

        // Scheduling
        if let Some(check_interval) = cli_config.check_interval {
            self.check_interval = Some(check_interval);
        }

        // Network & security
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }

        // Station store
        if let Some(ref api_url) = cli_config.api_url {
            self.api_url = Some(api_url.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Get probe timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(
            self.timeout
                .unwrap_or(timeouts::DEFAULT_PROBE_TIMEOUT_SECONDS),
        )
    }

    /// Get the effective batch size
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(batching::DEFAULT_BATCH_SIZE)
    }

    /// Get inter-batch settling delay as Duration
    pub fn batch_delay_duration(&self) -> Duration {
        Duration::from_millis(self.batch_delay.unwrap_or(timeouts::DEFAULT_BATCH_DELAY_MS))
    }

    /// Get recurring check interval as Duration
    pub fn check_interval_duration(&self) -> Duration {
        Duration::from_secs(
            self.check_interval
                .unwrap_or(scheduling::DEFAULT_CHECK_INTERVAL_MINUTES)
                * 60,
        )
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate probe timeout
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(crate::core::error::StreamsUpError::Config(
                    "Probe timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > 3600 {
                return Err(crate::core::error::StreamsUpError::Config(format!(
                    "Probe timeout of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        // Validate batch size
        if let Some(batch_size) = self.batch_size {
            if batch_size == 0 {
                return Err(crate::core::error::StreamsUpError::Config(
                    "Batch size cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if batch_size > 1000 {
                return Err(crate::core::error::StreamsUpError::Config(format!(
                    "Batch size of {batch_size} would probe far too many endpoints at once. Consider using a smaller value."
                )));
            }
        }

        // Validate check interval
        if let Some(check_interval) = self.check_interval {
            if check_interval == 0 {
                return Err(crate::core::error::StreamsUpError::Config(
                    "Check interval cannot be 0. Expected a positive number of minutes."
                        .to_string(),
                ));
            }
            if check_interval > scheduling::MAX_CHECK_INTERVAL_MINUTES {
                return Err(crate::core::error::StreamsUpError::Config(format!(
                    "Check interval of {check_interval} minutes is longer than a day. Consider using a smaller value."
                )));
            }
        }

        // Validate API URL shape
        if let Some(ref api_url) = self.api_url
            && !api_url.starts_with("http://")
            && !api_url.starts_with("https://")
        {
            return Err(crate::core::error::StreamsUpError::Config(format!(
                "Station API URL '{api_url}' must start with http:// or https://."
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Validation options
    pub timeout: Option<u64>,      // --timeout
    pub batch_size: Option<usize>, // --batch-size
    pub batch_delay: Option<u64>,  // --batch-delay

    // Scheduling
    pub once: bool,                  // --once
    pub check_interval: Option<u64>, // --interval

    // Output & format
    pub quiet: bool,       // --quiet
    pub verbose: bool,     // --verbose
    pub no_progress: bool, // --no-progress

    // Network & security
    pub user_agent: Option<String>,  // --user-agent
    pub proxy: Option<String>,       // --proxy
    pub skip_ssl_verification: bool, // --insecure

    // Station store
    pub api_url: Option<String>, // --api-url

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
