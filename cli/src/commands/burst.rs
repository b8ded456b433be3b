use std::time::Duration;

use anyhow::{Context, ensure};
use colored::*;
use crprobe_common::config::Config;
use crprobe_common::info;
use crprobe_core::pacing::BatchPacer;
use crprobe_core::prober::{BurstProber, ThrottlePolicy};

use crate::commands::ProbeArgs;
use crate::terminal::report::{self, TerminalObserver};
use crate::terminal::{print, spinner};

pub struct BurstSettings {
    pub duration: Duration,
    pub spacing: Duration,
    pub policy: ThrottlePolicy,
}

pub async fn burst(settings: BurstSettings, probe: ProbeArgs, cfg: &Config) -> anyhow::Result<()> {
    let client = probe.client()?;
    let tags = probe.tags();
    ensure!(!tags.is_empty(), "at least one player tag is required");

    let prober = BurstProber::new(tags, BatchPacer::new(settings.duration, settings.spacing))
        .with_policy(settings.policy);
    let pacer = prober.pacer();
    let batch_size = prober.tags().len();

    print::header("burst probe", cfg);
    print::aligned_line("Base URL", client.base_url().as_str());
    print::aligned_line("Endpoint", client.endpoint().to_string());
    print::aligned_line("Batch size", batch_size.to_string());
    print::aligned_line("Duration", format!("{}s", pacer.total().as_secs()).bold());
    print::aligned_line("Spacing", format!("{}ms", pacer.min_spacing().as_millis()));
    print::aligned_line("On 429", prober.policy().to_string());

    info!(
        "Running batches of {} for {}s",
        batch_size,
        pacer.total().as_secs()
    );

    let report = {
        let observer = TerminalObserver::burst(cfg, spinner::start("Starting...".into()), batch_size);
        prober
            .run(&client, &observer)
            .await
            .context("burst probe aborted")?
    };

    report::print_summary(&report, batch_size, cfg);
    Ok(())
}
