use futures::{StreamExt, stream};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::{BatchSummary, RunSummary, Station, ValidationOutcome};
use crate::reporting::logging;
use crate::repository::StationRepository;
use crate::ui::progress::ProgressReporter;
use crate::validation::{StreamValidator, ValidationTrace};

/// Drives a full fleet validation run: fetch, batch, validate, write back,
/// aggregate.
///
/// Batches execute strictly sequentially; within a batch every station is
/// validated concurrently and the orchestrator joins before advancing, so at
/// most `batch_size` probes are ever in flight.
pub struct Orchestrator {
    validator: StreamValidator,
    repository: Arc<dyn StationRepository>,
    batch_size: usize,
    batch_delay: Duration,
    cancel: CancellationToken,
    show_progress: bool,
}

impl Orchestrator {
    pub fn new(
        validator: StreamValidator,
        repository: Arc<dyn StationRepository>,
        batch_size: usize,
        batch_delay: Duration,
        cancel: CancellationToken,
        show_progress: bool,
    ) -> Self {
        Self {
            validator,
            repository,
            batch_size: batch_size.max(1),
            batch_delay,
            cancel,
            show_progress,
        }
    }

    pub fn from_config(
        config: &Config,
        repository: Arc<dyn StationRepository>,
        cancel: CancellationToken,
        show_progress: bool,
    ) -> Result<Self> {
        Ok(Self::new(
            StreamValidator::from_config(config)?,
            repository,
            config.effective_batch_size(),
            config.batch_delay_duration(),
            cancel,
            show_progress,
        ))
    }

    /// Validate the entire fleet once and return the aggregated summary.
    ///
    /// Only the initial station fetch can fail; every later failure is
    /// station-scoped and absorbed. A cancelled token stops the run between
    /// batches and yields the partial summary.
    pub async fn run_validation(&self) -> Result<RunSummary> {
        let stations = self.repository.list_stations().await?;
        logging::log_run_start(stations.len(), self.batch_size);

        let total_batches = stations.len().div_ceil(self.batch_size);
        let mut progress = ProgressReporter::new(self.show_progress);
        progress.start_run(stations.len());

        let mut summary = RunSummary::default();
        for (batch_index, batch) in stations.chunks(self.batch_size).enumerate() {
            if self.cancel.is_cancelled() {
                logging::log_run_cancelled(summary.processed, stations.len());
                break;
            }

            let outcomes = self.validate_batch(batch).await;

            // The batch has quiesced; tally and write back sequentially.
            let mut tally = BatchSummary::default();
            for outcome in &outcomes {
                tally.record(outcome.is_valid);
                if let Err(err) = self
                    .repository
                    .update_station_status(&outcome.station_id, outcome.is_valid)
                    .await
                {
                    logging::log_persistence_failure(&outcome.station_id, &err);
                }
            }

            summary.absorb(tally);
            logging::log_batch_complete(batch_index + 1, total_batches, &tally);
            progress.batch_done(batch_index + 1, total_batches, summary.processed);

            // Settle before the next batch, but never after the last one.
            // Racing the token keeps shutdown prompt.
            if batch_index + 1 < total_batches {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = sleep(self.batch_delay) => {}
                }
            }
        }

        progress.finish_run(&summary);
        logging::log_run_complete(&summary);
        Ok(summary)
    }

    /// Validate one batch with bounded concurrency and a hard join point.
    ///
    /// Every station in the batch yields exactly one outcome, reachable or
    /// not; completion order within the batch is unconstrained.
    async fn validate_batch(&self, batch: &[Station]) -> Vec<ValidationOutcome> {
        stream::iter(batch)
            .map(|station| {
                let validator = &self.validator;
                async move {
                    let is_valid = validator.validate(&station.stream_url).await;
                    logging::log_station_result(&station.name, &station.stream_url, is_valid);
                    ValidationOutcome::new(station.id.clone(), is_valid)
                }
            })
            .buffer_unordered(self.batch_size)
            .collect()
            .await
    }
}

/// Validate a single URI in verbose mode, outside any orchestration run.
///
/// Used by the CLI's positional-argument form; never touches the station
/// store.
pub async fn check_single(config: &Config, uri: &str) -> Result<ValidationTrace> {
    let validator = StreamValidator::from_config(config)?;
    Ok(validator.validate_traced(uri).await)
}
