use clap::Parser;
use std::sync::Arc;

use streamsup::config::Config;
use streamsup::orchestration::{Orchestrator, Scheduler, check_single};
use streamsup::reporting::logging;
use streamsup::repository::RestStationRepository;
use streamsup::ui::output;
use streamsup::ui::{Cli, cli_to_config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_streamsup_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main validation logic extracted from main() for testing
pub async fn run_streamsup_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    // Parse CLI arguments into CliConfig using the derive-based CLI
    let cli_config = cli_to_config(cli);

    // Load and merge configuration
    let config = load_and_merge_config(&cli_config)?;

    // Setup logging
    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    // Single-URI mode: verbose check, no station store involved
    if let Some(ref url) = cli.url {
        let trace = check_single(&config, url).await?;
        output::display_single_check(url, &trace);
        return Ok(if trace.is_valid { 0 } else { 1 });
    }

    if !cli_config.quiet {
        output::display_config_info(&config);
    }

    // Fleet mode: build the store client, orchestrator, and scheduler
    let repository = Arc::new(RestStationRepository::from_config(&config)?);
    let scheduler = Scheduler::new(config.check_interval_duration());
    let show_progress = !cli_config.quiet && !cli_config.no_progress;
    let orchestrator = Orchestrator::from_config(
        &config,
        repository,
        scheduler.cancellation_token(),
        show_progress,
    )?;

    if cli_config.once {
        let summary = orchestrator.run_validation().await.inspect_err(|e| {
            logging::log_error("Could not fetch station list", Some(e));
        })?;
        if !cli_config.quiet {
            output::display_run_summary(&summary);
        }
        Ok(0)
    } else {
        scheduler.run_recurring(&orchestrator, cli_config.quiet).await?;
        Ok(0)
    }
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(
    cli_config: &streamsup::config::CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Environment overrides the file; CLI arguments win over both
    config.apply_env_overrides();
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}
