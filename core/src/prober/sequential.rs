//! One-request-at-a-time prober.
//!
//! A single warm-up request for the first tag is sent up front, then every
//! tag is requested in order, `rounds` times over.

use crprobe_common::tag::PlayerTag;
use tokio::time::Instant;

use super::{BatchOutcome, ProbeObserver, ProbeReport};
use crate::api::StatusFetcher;
use crate::error::ApiError;

pub const DEFAULT_ROUNDS: usize = 10;

pub struct SequentialProber {
    tags: Vec<PlayerTag>,
    rounds: usize,
}

impl SequentialProber {
    pub fn new(tags: Vec<PlayerTag>, rounds: usize) -> Self {
        Self { tags, rounds }
    }

    pub fn tags(&self) -> &[PlayerTag] {
        &self.tags
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Every round is reported as one batch; the warm-up is not.
    pub async fn run(
        &self,
        fetcher: &dyn StatusFetcher,
        observer: &dyn ProbeObserver,
    ) -> Result<ProbeReport, ApiError> {
        let start = Instant::now();
        let mut report = ProbeReport::default();

        if let Some(first) = self.tags.first() {
            let status = fetcher.fetch_status(first).await?;
            observer.status(first, status);
            report.record(status);
        }

        for index in 1..=self.rounds {
            let started_at = start.elapsed();
            observer.batch_started(index, started_at);

            let round_start = Instant::now();
            let mut responses = Vec::with_capacity(self.tags.len());
            for tag in &self.tags {
                let status = fetcher.fetch_status(tag).await?;
                observer.status(tag, status);
                responses.push((tag.clone(), status));
            }

            let batch = BatchOutcome {
                index,
                started_at,
                elapsed: round_start.elapsed(),
                responses,
            };
            report.record_batch(&batch);
            observer.batch_finished(&batch);
        }

        report.elapsed = start.elapsed();
        Ok(report)
    }
}
