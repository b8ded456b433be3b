//! Concurrent **burst** prober.
//!
//! Each batch sends one request per tag at once over the shared client and
//! waits for all of them. Batches repeat until the pacer's total duration has
//! elapsed, and a fast batch is padded so batch starts stay at least the
//! minimum spacing apart.

use std::fmt;

use crprobe_common::tag::PlayerTag;
use futures::future::try_join_all;
use tokio::time::{Instant, sleep};
use tracing::debug;

use super::{BatchOutcome, ProbeObserver, ProbeReport};
use crate::api::StatusFetcher;
use crate::error::ApiError;
use crate::pacing::BatchPacer;

/// What to do after a batch that contained a 429.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThrottlePolicy {
    /// Report it and keep batching until the duration runs out.
    #[default]
    Continue,
    /// End the run right after the throttled batch.
    Stop,
}

impl fmt::Display for ThrottlePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThrottlePolicy::Continue => write!(f, "continue"),
            ThrottlePolicy::Stop => write!(f, "stop"),
        }
    }
}

pub struct BurstProber {
    tags: Vec<PlayerTag>,
    pacer: BatchPacer,
    policy: ThrottlePolicy,
}

impl BurstProber {
    pub fn new(tags: Vec<PlayerTag>, pacer: BatchPacer) -> Self {
        Self {
            tags,
            pacer,
            policy: ThrottlePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ThrottlePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn tags(&self) -> &[PlayerTag] {
        &self.tags
    }

    pub fn pacer(&self) -> BatchPacer {
        self.pacer
    }

    pub fn policy(&self) -> ThrottlePolicy {
        self.policy
    }

    pub async fn run(
        &self,
        fetcher: &dyn StatusFetcher,
        observer: &dyn ProbeObserver,
    ) -> Result<ProbeReport, ApiError> {
        let start = Instant::now();
        let mut report = ProbeReport::default();

        loop {
            let elapsed = start.elapsed();
            if !self.pacer.may_start(elapsed) {
                break;
            }

            let index = report.batches + 1;
            observer.batch_started(index, elapsed);

            let batch_start = Instant::now();
            let responses = try_join_all(self.tags.iter().map(|tag| async move {
                let status = fetcher.fetch_status(tag).await?;
                observer.status(tag, status);
                Ok::<_, ApiError>((tag.clone(), status))
            }))
            .await?;

            let batch = BatchOutcome {
                index,
                started_at: elapsed,
                elapsed: batch_start.elapsed(),
                responses,
            };
            report.record_batch(&batch);
            observer.batch_finished(&batch);
            debug!(batch = index, took = ?batch.elapsed, "batch complete");

            if batch.throttled() > 0 {
                observer.throttled(&batch, self.policy);
                if self.policy == ThrottlePolicy::Stop {
                    report.stopped_on_throttle = true;
                    break;
                }
            }

            if let Some(pad) = self.pacer.padding(batch_start.elapsed()) {
                sleep(pad).await;
            }
        }

        report.elapsed = start.elapsed();
        Ok(report)
    }
}
