//! The rate-limit **probers**.
//!
//! Two strategies share the same reporting surface:
//!
//! * [`SequentialProber`] sends one request at a time, round after round.
//! * [`BurstProber`] sends one concurrent batch per round for a fixed
//!   wall-clock duration, keeping batch starts a minimum distance apart.
//!
//! Neither strategy retries or backs off. Non-2xx responses are recorded as
//! data; only a transport failure ends a run early, and it aborts the whole
//! batch it happened in.
//!
//! Progress is reported through a [`ProbeObserver`] so the caller decides how
//! to render it.

use std::collections::BTreeMap;
use std::time::Duration;

use crprobe_common::tag::PlayerTag;
use reqwest::StatusCode;

mod burst;
mod sequential;

pub use burst::{BurstProber, ThrottlePolicy};
pub use sequential::{DEFAULT_ROUNDS, SequentialProber};

pub fn is_throttled(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}

/// Callbacks fired while a probe runs. Every method defaults to a no-op.
pub trait ProbeObserver: Send + Sync {
    /// A batch (or sequential round) is about to start, `at` into the run.
    fn batch_started(&self, _index: usize, _at: Duration) {}

    /// One response arrived.
    fn status(&self, _tag: &PlayerTag, _status: StatusCode) {}

    fn batch_finished(&self, _batch: &BatchOutcome) {}

    /// A finished batch contained at least one 429.
    fn throttled(&self, _batch: &BatchOutcome, _policy: ThrottlePolicy) {}
}

pub struct SilentObserver;

impl ProbeObserver for SilentObserver {}

/// The responses of one batch, in tag order.
#[derive(Clone, Debug)]
pub struct BatchOutcome {
    /// 1-based.
    pub index: usize,
    pub started_at: Duration,
    pub elapsed: Duration,
    pub responses: Vec<(PlayerTag, StatusCode)>,
}

impl BatchOutcome {
    pub fn statuses(&self) -> Vec<StatusCode> {
        self.responses.iter().map(|(_, status)| *status).collect()
    }

    pub fn throttled(&self) -> usize {
        self.responses
            .iter()
            .filter(|(_, status)| is_throttled(*status))
            .count()
    }

    pub fn first_throttled(&self) -> Option<&PlayerTag> {
        self.responses
            .iter()
            .find(|(_, status)| is_throttled(*status))
            .map(|(tag, _)| tag)
    }
}

/// Totals for a finished run.
#[derive(Clone, Debug, Default)]
pub struct ProbeReport {
    pub batches: usize,
    pub requests: usize,
    pub throttled: usize,
    pub elapsed: Duration,
    /// Response count per status code.
    pub status_counts: BTreeMap<u16, usize>,
    pub stopped_on_throttle: bool,
}

impl ProbeReport {
    pub(crate) fn record(&mut self, status: StatusCode) {
        self.requests += 1;
        if is_throttled(status) {
            self.throttled += 1;
        }
        *self.status_counts.entry(status.as_u16()).or_default() += 1;
    }

    pub(crate) fn record_batch(&mut self, batch: &BatchOutcome) {
        self.batches += 1;
        for (_, status) in &batch.responses {
            self.record(*status);
        }
    }

    pub fn successes(&self) -> usize {
        self.status_counts
            .iter()
            .filter(|(code, _)| (200..300).contains(*code))
            .map(|(_, count)| count)
            .sum()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn batch(statuses: &[u16]) -> BatchOutcome {
        let tags = testing::tags(&["#AAA", "#BBB", "#CCC", "#DDD"]);
        BatchOutcome {
            index: 1,
            started_at: Duration::ZERO,
            elapsed: Duration::ZERO,
            responses: tags
                .into_iter()
                .zip(statuses.iter().map(|s| StatusCode::from_u16(*s).unwrap()))
                .collect(),
        }
    }

    #[test]
    fn first_throttled_tag_is_reported() {
        let outcome = batch(&[200, 429, 200, 429]);
        assert_eq!(outcome.throttled(), 2);
        assert_eq!(outcome.first_throttled().map(|t| t.as_str()), Some("BBB"));
    }

    #[test]
    fn report_aggregates_by_status() {
        let mut report = ProbeReport::default();
        report.record_batch(&batch(&[200, 200, 429, 503]));
        report.record_batch(&batch(&[200, 200, 200, 200]));

        assert_eq!(report.batches, 2);
        assert_eq!(report.requests, 8);
        assert_eq!(report.throttled, 1);
        assert_eq!(report.successes(), 6);
        assert_eq!(report.status_counts.get(&503), Some(&1));
    }
}
