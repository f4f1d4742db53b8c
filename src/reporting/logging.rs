use log::{debug, error, info, warn};

use crate::config::Config;
use crate::core::types::{BatchSummary, RunSummary};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let batch_size = config.effective_batch_size();
    let batch_delay = config.batch_delay_duration().as_millis();
    let check_interval = config.check_interval_duration().as_secs() / 60;

    info!("Configuration: batch_size={batch_size}, probe_timeout={timeout}s");
    info!("Pacing: batch_delay={batch_delay}ms, check_interval={check_interval}min");
    info!(
        "Station store: endpoint={}",
        config.api_url.as_deref().unwrap_or("<unset>")
    );
}

/// Log the start of a fleet validation run
pub fn log_run_start(station_count: usize, batch_size: usize) {
    let batches = station_count.div_ceil(batch_size.max(1));
    info!("Starting validation of {station_count} station(s) in {batches} batch(es)");
}

/// Log completion of one batch
pub fn log_batch_complete(batch: usize, total_batches: usize, tally: &BatchSummary) {
    info!(
        "Batch {batch}/{total_batches}: {} online, {} offline",
        tally.valid, tally.invalid
    );
}

/// Log an individual station verdict for debugging
pub fn log_station_result(name: &str, url: &str, is_valid: bool) {
    if is_valid {
        debug!("✓ {name} -> {url}");
    } else {
        debug!("✗ {name} -> {url}");
    }
}

/// Log an individual probe result for debugging
pub fn log_probe_result(url: &str, status: Option<u16>, description: Option<&str>) {
    match (status, description) {
        (Some(status), _) => debug!("✓ {url} -> {status}"),
        (None, Some(desc)) => debug!("✗ {url} -> {desc}"),
        (None, None) => debug!("? {url} -> unknown"),
    }
}

/// Log a manifest resolution failure (recovered locally as offline)
pub fn log_manifest_failure(manifest_uri: &str, reason: &str) {
    debug!("Manifest {manifest_uri} yielded no entries: {reason}");
}

/// Log a failed status write-back; the run continues regardless
pub fn log_persistence_failure(station_id: &str, err: &dyn std::error::Error) {
    warn!("Could not persist status for station '{station_id}': {err}");
}

/// Log completion of a full run
pub fn log_run_complete(summary: &RunSummary) {
    if summary.has_offline() {
        warn!("❌ Validation complete: {summary}");
    } else {
        info!("✅ Validation complete: {summary}");
    }
}

/// Log a run stopped early by cancellation
pub fn log_run_cancelled(processed: usize, total: usize) {
    warn!("Run cancelled after {processed}/{total} station(s)");
}

/// Log that a termination signal was received
pub fn log_shutdown_requested() {
    info!("Termination signal received, finishing current batch before exit");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
