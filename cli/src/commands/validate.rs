use colored::*;
use crprobe_common::config::Config;
use crprobe_common::success;
use crprobe_common::tag::PlayerTag;
use crprobe_core::StatusCode;
use crprobe_core::error::ApiError;
use url::Url;

use crate::commands;
use crate::terminal::print;

pub async fn validate(tag: PlayerTag, api_base: Option<Url>, cfg: &Config) -> anyhow::Result<()> {
    let client = commands::api_client(api_base)?;

    print::header("player lookup", cfg);

    let profile = match client.player_profile(&tag).await {
        Ok(profile) => profile,
        Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
            anyhow::bail!("player {tag} does not exist");
        }
        Err(e) => return Err(e.into()),
    };

    success!("{} is a valid player tag", tag);

    let arena = profile
        .arena
        .as_ref()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "unknown".to_string());

    print::tree_title(&profile.name);
    print::tree(&[
        ("Tag".to_string(), profile.tag.normal()),
        ("Level".to_string(), profile.exp_level.to_string().normal()),
        ("Trophies".to_string(), profile.trophies.to_string().yellow()),
        ("Best".to_string(), profile.best_trophies.to_string().yellow()),
        ("Wins".to_string(), profile.wins.to_string().green()),
        ("Losses".to_string(), profile.losses.to_string().red()),
        ("Battles".to_string(), profile.battle_count.to_string().normal()),
        ("3 Crowns".to_string(), profile.three_crown_wins.to_string().normal()),
        ("Arena".to_string(), arena.normal()),
    ]);

    Ok(())
}
