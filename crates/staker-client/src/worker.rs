//! Background dashboard refresh.
//!
//! The reactive-read rule made explicit: the snapshot is a function of
//! (wallet address, plan index, candidate amount) and is recomputed whenever
//! any input changes, plus on a polling interval so chain-side changes show
//! up. Consecutive failing cycles back off exponentially with jitter.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;

use crate::projection::{DashboardSnapshot, StakerReader};
use crate::types::GROWTH_PLAN;

/// Base backoff after a failing refresh cycle (1 second).
const BASE_BACKOFF_MS: u64 = 1_000;
/// Maximum backoff (1 minute).
const MAX_BACKOFF_MS: u64 = 60_000;

/// The declared inputs of the dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInputs {
    pub plan: u8,
    /// Candidate deposit amount exactly as typed.
    pub amount: String,
}

impl Default for DashboardInputs {
    fn default() -> Self {
        Self {
            plan: GROWTH_PLAN,
            amount: String::new(),
        }
    }
}

/// Periodically re-reads the dashboard snapshot and publishes it.
pub struct RefreshWorker {
    reader: Arc<StakerReader>,
    inputs: watch::Receiver<DashboardInputs>,
    out: watch::Sender<DashboardSnapshot>,
    poll_interval: Duration,
}

impl RefreshWorker {
    /// Build a worker plus the receiver its snapshots publish over.
    ///
    /// The initial published state is [`DashboardSnapshot::loading`].
    pub fn new(
        reader: Arc<StakerReader>,
        inputs: watch::Receiver<DashboardInputs>,
        poll_interval: Duration,
    ) -> (Self, watch::Receiver<DashboardSnapshot>) {
        let (out, snapshots) = watch::channel(DashboardSnapshot::loading());
        (
            Self {
                reader,
                inputs,
                out,
                poll_interval,
            },
            snapshots,
        )
    }

    /// Run until the input sender or every snapshot receiver is dropped.
    pub async fn run(mut self) {
        let mut consecutive_failures: u32 = 0;
        let mut backoff_ms: u64 = BASE_BACKOFF_MS;

        let mut interval = tokio::time::interval(self.poll_interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                changed = self.inputs.changed() => {
                    if changed.is_err() {
                        tracing::debug!("input channel closed, refresh worker stopping");
                        return;
                    }
                    // The projection slice is a function of the inputs that
                    // just changed; flag it until the fresh value lands.
                    self.out.send_modify(|snapshot| {
                        snapshot.projected = crate::projection::Readout::Stale;
                    });
                }
            }

            // Back off on consecutive failures
            if consecutive_failures > 0 {
                let jitter = rand::rng().random_range(0..=(backoff_ms / 4));
                tokio::time::sleep(Duration::from_millis(backoff_ms + jitter)).await;
            }

            let inputs = self.inputs.borrow_and_update().clone();
            let snapshot = self.reader.snapshot(inputs.plan, &inputs.amount).await;

            if snapshot.has_failures() {
                consecutive_failures += 1;
                backoff_ms = (BASE_BACKOFF_MS * 2u64.saturating_pow(consecutive_failures))
                    .min(MAX_BACKOFF_MS);
                tracing::warn!(
                    failures = consecutive_failures,
                    next_backoff_ms = backoff_ms,
                    "refresh cycle had failing reads"
                );
            } else {
                consecutive_failures = 0;
                backoff_ms = BASE_BACKOFF_MS;
            }

            if self.out.send(snapshot).is_err() {
                tracing::debug!("all snapshot receivers dropped, refresh worker stopping");
                return;
            }
        }
    }
}
