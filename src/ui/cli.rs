// Command-line interface definitions and parsing for streamsup

use crate::config::CliConfig;
use crate::core::constants::{batching, timeouts};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Stream URL to check once in verbose mode (skips the station store)
    pub url: Option<String>,

    // Scheduling
    /// Run a single fleet validation pass and exit
    #[arg(long, help_heading = "Scheduling")]
    pub once: bool,

    /// Minutes between fleet validation passes (default: 10)
    #[arg(long, value_name = "MINUTES", help_heading = "Scheduling")]
    pub interval: Option<u64>,

    // Validation
    /// Probe timeout in seconds (default: 5)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Validation")]
    pub timeout: Option<u64>,

    /// Stations validated concurrently per batch (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Validation")]
    pub batch_size: Option<usize>,

    /// Settling delay between batches in ms (default: 1000)
    #[arg(long, value_name = "MS", help_heading = "Validation")]
    pub batch_delay: Option<u64>,

    // Station Store
    /// Station API endpoint (overrides STREAMSUP_API_URL)
    #[arg(long, value_name = "URL", help_heading = "Station Store")]
    pub api_url: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Network & Security
    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network & Security")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Network & Security")]
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Network & Security")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig::default();

    // Validation options
    if let Some(timeout) = cli.timeout {
        if timeout == 0 {
            eprintln!(
                "Error: Timeout cannot be 0. Expected a positive integer representing seconds."
            );
            std::process::exit(1);
        }
        if timeout > timeouts::MAX_PROBE_TIMEOUT_SECONDS {
            eprintln!(
                "Warning: Timeout of {timeout} seconds is quite large for a reachability probe. Consider using a smaller value."
            );
        }
        cli_config.timeout = Some(timeout);
    }

    if let Some(batch_size) = cli.batch_size {
        if batch_size == 0 {
            eprintln!("Error: Batch size cannot be 0. Expected a positive integer.");
            std::process::exit(1);
        }
        if batch_size > batching::MAX_BATCH_SIZE {
            eprintln!(
                "Warning: Batch size of {batch_size} is quite high and may overwhelm upstream servers. Consider using a smaller value."
            );
        }
        cli_config.batch_size = Some(batch_size);
    }

    if let Some(batch_delay) = cli.batch_delay {
        cli_config.batch_delay = Some(batch_delay);
    }

    // Scheduling
    cli_config.once = cli.once;
    if let Some(interval) = cli.interval {
        if interval == 0 {
            eprintln!("Error: Interval cannot be 0. Expected a positive number of minutes.");
            std::process::exit(1);
        }
        cli_config.check_interval = Some(interval);
    }

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_progress = cli.no_progress;

    // Network & security
    cli_config.user_agent = cli.user_agent.clone();
    cli_config.proxy = cli.proxy.clone();
    cli_config.skip_ssl_verification = cli.insecure;

    // Station store
    cli_config.api_url = cli.api_url.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    cli_config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_default_cli() -> Cli {
        Cli {
            url: None,
            once: false,
            interval: None,
            timeout: None,
            batch_size: None,
            batch_delay: None,
            api_url: None,
            quiet: false,
            verbose: false,
            no_progress: false,
            user_agent: None,
            proxy: None,
            insecure: false,
            config: None,
            no_config: false,
        }
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli = create_default_cli();

        let config = cli_to_config(&cli);

        assert_eq!(config.timeout, None);
        assert_eq!(config.batch_size, None);
        assert_eq!(config.batch_delay, None);
        assert_eq!(config.check_interval, None);
        assert!(!config.once);
        assert!(!config.quiet);
        assert!(!config.verbose);
        assert!(!config.no_progress);
        assert_eq!(config.user_agent, None);
        assert_eq!(config.proxy, None);
        assert!(!config.skip_ssl_verification);
        assert_eq!(config.api_url, None);
        assert_eq!(config.config_file, None);
        assert!(!config.no_config);
    }

    #[test]
    fn test_cli_to_config_all_options() {
        let mut cli = create_default_cli();
        cli.url = Some("https://radio.test/live.m3u8".to_string());
        cli.once = true;
        cli.interval = Some(30);
        cli.timeout = Some(3);
        cli.batch_size = Some(20);
        cli.batch_delay = Some(500);
        cli.api_url = Some("https://store.test/rest/v1".to_string());
        cli.quiet = true;
        cli.verbose = true;
        cli.no_progress = true;
        cli.user_agent = Some("CustomAgent/1.0".to_string());
        cli.proxy = Some("http://proxy:8080".to_string());
        cli.insecure = true;
        cli.config = Some("config.toml".to_string());
        cli.no_config = true;

        let config = cli_to_config(&cli);

        assert!(config.once);
        assert_eq!(config.check_interval, Some(30));
        assert_eq!(config.timeout, Some(3));
        assert_eq!(config.batch_size, Some(20));
        assert_eq!(config.batch_delay, Some(500));
        assert_eq!(
            config.api_url,
            Some("https://store.test/rest/v1".to_string())
        );
        assert!(config.quiet);
        assert!(config.verbose);
        assert!(config.no_progress);
        assert_eq!(config.user_agent, Some("CustomAgent/1.0".to_string()));
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert!(config.skip_ssl_verification);
        assert_eq!(config.config_file, Some("config.toml".to_string()));
        assert!(config.no_config);
    }

    #[test]
    fn test_cli_to_config_boundary_values() {
        let mut cli = create_default_cli();
        cli.timeout = Some(1);
        cli.batch_size = Some(1);
        cli.batch_delay = Some(0);
        cli.interval = Some(1);

        let config = cli_to_config(&cli);

        assert_eq!(config.timeout, Some(1));
        assert_eq!(config.batch_size, Some(1));
        assert_eq!(config.batch_delay, Some(0));
        assert_eq!(config.check_interval, Some(1));
    }

    #[test]
    fn test_cli_parses_positional_url() {
        let cli = Cli::parse_from(["streamsup", "https://radio.test/live.m3u8"]);
        assert_eq!(cli.url, Some("https://radio.test/live.m3u8".to_string()));
        assert!(!cli.once);
    }

    #[test]
    fn test_cli_parses_fleet_flags() {
        let cli = Cli::parse_from([
            "streamsup",
            "--once",
            "--batch-size",
            "25",
            "--batch-delay",
            "250",
            "--interval",
            "5",
        ]);
        assert!(cli.once);
        assert_eq!(cli.batch_size, Some(25));
        assert_eq!(cli.batch_delay, Some(250));
        assert_eq!(cli.interval, Some(5));
        assert_eq!(cli.url, None);
    }
}
