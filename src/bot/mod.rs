//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the pager core: slash
//! commands, the interaction transport that feeds pager sessions, the
//! presence rotator, and the shared bot context. Commands in whitelisted
//! guilds (and DMs) are the only entry points; everything stateful lives in
//! [`crate::core`].

/// Discord command implementations (card, whitelist, general)
pub mod commands;
/// Yes/no confirmation prompts
pub mod confirm;
/// Rotating presence status
pub mod presence;
/// The Discord-backed pager transport
pub mod transport;

use std::collections::HashSet;

use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::settings::Settings;
use crate::core::whitelist;
use crate::errors::{Error, Result};

/// Shared data available to all bot commands.
pub struct Data {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Tunables loaded from config.toml
    pub settings: Settings,
    /// In-memory copy of the guild whitelist; the database stays
    /// authoritative and every write goes through [`crate::core::whitelist`]
    pub whitelist: RwLock<HashSet<u64>>,
}

/// Type alias for the context Poise hands to every command
pub type Context<'a> = poise::Context<'a, Data, Error>;

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Gate applied before every command: DMs are always allowed, guild commands
/// only when the guild is whitelisted. A silent `false` makes the bot appear
/// absent in unlisted guilds rather than replying with a refusal.
async fn is_guild_allowed(ctx: Context<'_>) -> Result<bool> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(true);
    };
    // Owners bypass the gate so they can whitelist a fresh guild from
    // inside it.
    if ctx.framework().options().owners.contains(&ctx.author().id) {
        return Ok(true);
    }
    let allowed = ctx.data().whitelist.read().await.contains(&guild_id.get());
    if !allowed {
        debug!(guild_id = guild_id.get(), "ignoring command from non-whitelisted guild");
    }
    Ok(allowed)
}

/// Builds the Poise framework and runs the bot until the gateway connection
/// ends.
#[instrument(skip_all)]
pub async fn run_bot(token: String, settings: Settings, database: DatabaseConnection) -> Result<()> {
    let whitelist: HashSet<u64> = whitelist::load_guilds(&database)
        .await?
        .into_iter()
        .collect();
    info!(guilds = whitelist.len(), "loaded guild whitelist");

    let presence_settings = settings.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::card(),
                commands::whitelist(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            command_check: Some(|ctx| Box::pin(is_guild_allowed(ctx))),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                presence::spawn_rotator(ctx.clone(), presence_settings);
                Ok(Data {
                    database,
                    settings,
                    whitelist: RwLock::new(whitelist),
                })
            })
        })
        .build();

    // Everything here is slash commands and component presses, so the
    // non-privileged intents are enough.
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)?;

    client.start().await.map_err(Error::from)
}
