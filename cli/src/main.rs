mod commands;
mod terminal;

use std::path::Path;
use std::time::Duration;

use commands::{CommandLine, Commands, burst, delete_user, sequential, validate};
use crprobe_common::config::{self, Config};
use crprobe_common::info;
use crprobe_core::prober::ThrottlePolicy;
use terminal::{logging, print};
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
    };

    print::banner(&cfg);
    load_env(&commands.env_file)?;

    let result = match commands.command {
        Commands::Sequential { rounds, probe } => {
            sequential::sequential(rounds, probe, &cfg).await
        }
        Commands::Burst {
            duration,
            spacing_ms,
            stop_on_throttle,
            probe,
        } => {
            let settings = burst::BurstSettings {
                duration: Duration::from_secs(duration),
                spacing: Duration::from_millis(spacing_ms),
                policy: if stop_on_throttle {
                    ThrottlePolicy::Stop
                } else {
                    ThrottlePolicy::Continue
                },
            };
            burst::burst(settings, probe, &cfg).await
        }
        Commands::Validate { tag, api_base } => validate::validate(tag, api_base, &cfg).await,
        Commands::DeleteUser {
            user_id,
            dry_run,
            soft,
        } => delete_user::delete_user(user_id, dry_run, soft, &cfg).await,
    };

    print::end_of_program(&cfg);
    result
}

fn load_env(path: &Path) -> anyhow::Result<()> {
    if config::load_env_file(path)? {
        debug!("Loaded environment from {}", path.display());
    } else {
        info!(
            "{} not found, reading credentials from the process environment",
            path.display()
        );
    }
    Ok(())
}
