use crprobe_common::config::{Config, ProcessEnv};
use crprobe_common::{info, success};
use crprobe_core::admin::{self, DeleteMode, DeletionOutcome, DeletionRequest, UserId};

use crate::terminal::print;

pub async fn delete_user(user_id: UserId, dry_run: bool, soft: bool, cfg: &Config) -> anyhow::Result<()> {
    print::header("delete user", cfg);

    let request = DeletionRequest {
        user_id,
        mode: if dry_run {
            DeleteMode::DryRun
        } else {
            DeleteMode::Execute
        },
        soft,
    };

    print::aligned_line("User", user_id.to_string());
    print::aligned_line("Mode", if dry_run { "dry run" } else { "delete" });
    if soft {
        print::aligned_line("Soft delete", "yes");
    }

    match admin::delete_from_env(&ProcessEnv, &request).await? {
        DeletionOutcome::Deleted => success!("User {} deleted", user_id),
        DeletionOutcome::Skipped => info!("Nothing was deleted"),
    }

    Ok(())
}
