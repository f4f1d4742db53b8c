use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use crate::core::error::Result;
use crate::orchestration::runner::Orchestrator;
use crate::reporting::logging;
use crate::ui::output;

/// Triggers fleet validation runs on a fixed cadence and owns the
/// cancellation token that makes shutdown cooperative.
///
/// On a termination signal the token is cancelled; an in-flight run stops
/// between batches and the loop exits cleanly.
pub struct Scheduler {
    check_interval: Duration,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(check_interval: Duration) -> Self {
        Self {
            check_interval,
            cancel: CancellationToken::new(),
        }
    }

    /// The token the orchestrator should be constructed with so runs respect
    /// scheduler-driven shutdown.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run fleet validation now and then on every interval tick until a
    /// termination signal arrives.
    ///
    /// A failed run (fatal station fetch) is logged and the cadence
    /// continues; the next tick gets a fresh attempt. A run that outlasts the
    /// interval delays the next tick rather than stacking runs.
    pub async fn run_recurring(&self, orchestrator: &Orchestrator, quiet: bool) -> Result<()> {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                logging::log_shutdown_requested();
                cancel.cancel();
            }
        });

        let mut ticker = interval(self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match orchestrator.run_validation().await {
                Ok(summary) => {
                    if !quiet {
                        output::display_run_summary(&summary);
                    }
                }
                Err(err) => logging::log_error("Fleet validation run failed", Some(&err)),
            }

            if self.cancel.is_cancelled() {
                break;
            }
        }

        Ok(())
    }
}
