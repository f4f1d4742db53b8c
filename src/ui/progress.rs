use indicatif::{ProgressBar, ProgressStyle};

use crate::core::types::RunSummary;

/// Batch-level progress display for fleet runs.
///
/// Disabled instances swallow every call so orchestration code never branches
/// on display state.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self { bar: None, enabled }
    }

    pub fn start_run(&mut self, total_stations: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_stations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} stations checked {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        self.bar = Some(pb);
    }

    pub fn batch_done(&self, batch: usize, total_batches: usize, processed: usize) {
        if let Some(ref pb) = self.bar {
            pb.set_position(processed as u64);
            pb.set_message(format!("(batch {batch}/{total_batches})"));
        }
    }

    pub fn finish_run(&self, summary: &RunSummary) {
        if let Some(ref pb) = self.bar {
            pb.finish_with_message(format!("✓ {summary}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_swallows_calls() {
        let mut progress = ProgressReporter::new(false);
        progress.start_run(23);
        progress.batch_done(1, 3, 10);
        progress.finish_run(&RunSummary::default());
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_enabled_reporter_tracks_position() {
        let mut progress = ProgressReporter::new(true);
        progress.start_run(23);
        progress.batch_done(1, 3, 10);
        progress.batch_done(2, 3, 20);
        progress.batch_done(3, 3, 23);
        progress.finish_run(&RunSummary {
            valid: 20,
            invalid: 3,
            processed: 23,
        });
        assert!(progress.bar.is_some());
    }
}
