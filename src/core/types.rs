use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered audio-stream endpoint as stored in the station store.
///
/// The validation engine only reads `id` and `stream_url` and writes back
/// `is_online`/`updated_at`; everything else is owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Opaque station key assigned by the store
    pub id: String,
    /// Display name
    pub name: String,
    /// Absolute URI of the audio stream or HLS manifest
    pub stream_url: String,
    /// Liveness verdict from the most recent validation
    #[serde(default)]
    pub is_online: bool,
    /// When the liveness verdict was last written
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The verdict for a single station within one orchestration run.
///
/// Ephemeral: produced when a station's validation task returns and consumed
/// by the write-back and tallying steps of the same batch.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub station_id: String,
    pub is_valid: bool,
    pub checked_at: DateTime<Utc>,
}

impl ValidationOutcome {
    pub fn new(station_id: String, is_valid: bool) -> Self {
        Self {
            station_id,
            is_valid,
            checked_at: Utc::now(),
        }
    }
}

/// Valid/invalid tallies for one batch.
///
/// Batch-local only. Tallies are recorded after the batch's concurrent tasks
/// have all joined, so no counter is ever touched by two tasks at once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub valid: usize,
    pub invalid: usize,
}

impl BatchSummary {
    pub fn record(&mut self, is_valid: bool) {
        if is_valid {
            self.valid += 1;
        } else {
            self.invalid += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.valid + self.invalid
    }
}

/// Aggregated totals for one full fleet validation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub valid: usize,
    pub invalid: usize,
    pub processed: usize,
}

impl RunSummary {
    /// Fold a completed batch's tallies into the running totals.
    pub fn absorb(&mut self, batch: BatchSummary) {
        self.valid += batch.valid;
        self.invalid += batch.invalid;
        self.processed += batch.total();
    }

    pub fn has_offline(&self) -> bool {
        self.invalid > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} online, {} offline, {} checked",
            self.valid, self.invalid, self.processed
        )
    }
}
