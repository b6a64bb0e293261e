//! Rotating presence status.
//!
//! Cycles the bot's Discord status line through the configured list on a
//! fixed interval. The task is spawned once from framework setup and runs for
//! the lifetime of the process.

use poise::serenity_prelude as serenity;
use serenity::ActivityData;
use tracing::debug;

use crate::config::settings::Settings;

/// Spawns the background task that rotates the presence line.
pub fn spawn_rotator(ctx: serenity::Context, settings: Settings) {
    let interval = settings.presence_interval();
    let statuses = settings.presence_statuses;
    let Some(first) = statuses.first() else {
        return;
    };
    ctx.set_activity(Some(ActivityData::custom(first.clone())));

    if statuses.len() < 2 {
        return;
    }

    tokio::spawn(async move {
        for status in statuses.iter().cycle().skip(1) {
            tokio::time::sleep(interval).await;
            debug!(status = %status, "rotating presence");
            ctx.set_activity(Some(ActivityData::custom(status.clone())));
        }
    });
}
