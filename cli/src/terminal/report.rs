use std::time::Duration;

use colored::*;
use crprobe_common::config::Config;
use crprobe_common::tag::PlayerTag;
use crprobe_common::{success, warn};
use crprobe_core::StatusCode;
use crprobe_core::prober::{BatchOutcome, ProbeObserver, ProbeReport, ThrottlePolicy};
use tracing::debug;

use crate::mprint;
use crate::terminal::spinner::SpinnerHandle;
use crate::terminal::{colors, format, print};

/// Renders probe progress to the terminal.
pub struct TerminalObserver<'a> {
    cfg: &'a Config,
    spinner: Option<SpinnerHandle>,
    /// Print each response as it arrives rather than once per batch.
    per_request: bool,
    batch_size: usize,
}

impl<'a> TerminalObserver<'a> {
    pub fn sequential(cfg: &'a Config) -> Self {
        Self {
            cfg,
            spinner: None,
            per_request: true,
            batch_size: 0,
        }
    }

    pub fn burst(cfg: &'a Config, spinner: SpinnerHandle, batch_size: usize) -> Self {
        Self {
            cfg,
            spinner: Some(spinner),
            per_request: false,
            batch_size,
        }
    }
}

impl ProbeObserver for TerminalObserver<'_> {
    fn batch_started(&self, index: usize, at: Duration) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!(
                "Batch {}: waiting on {} responses",
                index.to_string().color(colors::ACCENT).bold(),
                self.batch_size
            ));
        }

        if self.cfg.show_statuses() {
            let line = format!("=== Starting batch {} at {:.2}s ===", index, at.as_secs_f64());
            mprint!();
            mprint!(&format!("{}", line.color(colors::PRIMARY)));
        }
    }

    fn status(&self, tag: &PlayerTag, status: StatusCode) {
        if self.per_request && self.cfg.show_statuses() {
            print::bullet(format!("{} {}", tag, format::status(status)));
        } else {
            debug!(%tag, %status, "response");
        }
    }

    fn batch_finished(&self, batch: &BatchOutcome) {
        if self.per_request || !self.cfg.show_statuses() {
            return;
        }

        print::bullet(format::status_list(&batch.statuses()));
        let details: Vec<(String, ColoredString)> = batch
            .responses
            .iter()
            .map(|(tag, status)| (tag.to_string(), format::status(*status)))
            .collect();
        print::tree(&details);
    }

    fn throttled(&self, batch: &BatchOutcome, policy: ThrottlePolicy) {
        let first = batch
            .first_throttled()
            .map(|tag| tag.to_string())
            .unwrap_or_default();
        let action = match policy {
            ThrottlePolicy::Continue => "continuing with the next batch",
            ThrottlePolicy::Stop => "stopping as requested",
        };
        warn!(
            "Batch {} throttled: {} of {} requests returned 429 (first: {}), {}",
            batch.index,
            batch.throttled(),
            batch.responses.len(),
            first,
            action
        );
    }
}

pub fn print_summary(report: &ProbeReport, batch_size: usize, cfg: &Config) {
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();
    let batches: ColoredString = report.batches.to_string().bold().green();
    let requests: ColoredString = report.requests.to_string().bold().green();
    let time_line = format!("Total time taken: {total_time}, Batches run: {batches}");
    let request_line = format!("Total requests made: {requests}");

    if !cfg.show_headers() {
        mprint!();
        success!("{}", time_line);
        success!("{}", request_line);
        return;
    }

    mprint!();
    print::header("results", cfg);
    print::aligned_line("Batch size", batch_size.to_string());
    print::aligned_line("Succeeded", report.successes().to_string().green());
    print::aligned_line("Throttled", throttled_value(report.throttled));
    if report.stopped_on_throttle {
        print::aligned_line("Stopped", "on first throttled batch".yellow());
    }
    if !report.status_counts.is_empty() {
        print::tree_title("Responses by status");
        print::tree(&format::histogram_to_detail(&report.status_counts));
    }

    print::rule();
    print::centered(&time_line);
    print::centered(&request_line);
}

fn throttled_value(count: usize) -> ColoredString {
    if count == 0 {
        "0".green()
    } else {
        count.to_string().red().bold()
    }
}
