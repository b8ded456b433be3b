use anyhow::Context;
use colored::*;
use crprobe_common::config::Config;
use crprobe_core::prober::SequentialProber;

use crate::commands::ProbeArgs;
use crate::terminal::report::{self, TerminalObserver};
use crate::terminal::print;

pub async fn sequential(rounds: usize, probe: ProbeArgs, cfg: &Config) -> anyhow::Result<()> {
    let client = probe.client()?;
    let tags = probe.tags();

    let prober = SequentialProber::new(tags, rounds);
    let batch_size = prober.tags().len();

    print::header("sequential probe", cfg);
    print::aligned_line("Base URL", client.base_url().as_str());
    print::aligned_line("Endpoint", client.endpoint().to_string());
    print::aligned_line("Tags", batch_size.to_string());
    print::aligned_line("Rounds", prober.rounds().to_string().bold());

    let observer = TerminalObserver::sequential(cfg);

    let report = prober
        .run(&client, &observer)
        .await
        .context("sequential probe aborted")?;

    report::print_summary(&report, batch_size, cfg);
    Ok(())
}
