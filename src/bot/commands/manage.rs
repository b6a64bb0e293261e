//! Owner-only guild whitelist management.
//!
//! The bot ignores commands from guilds that are not whitelisted, so these
//! are the only way to turn it on somewhere new. Writes go to the database
//! first and the in-memory copy second.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, core::whitelist as whitelist_ops, errors::Result};

    fn resolve_guild(ctx: &Context<'_>, explicit: Option<&str>) -> Option<u64> {
        match explicit {
            Some(raw) => raw.trim().parse().ok(),
            None => ctx.guild_id().map(poise::serenity_prelude::GuildId::get),
        }
    }

    /// Guild whitelist management.
    #[poise::command(
        slash_command,
        owners_only,
        subcommands("whitelist_add", "whitelist_remove"),
        subcommand_required
    )]
    pub async fn whitelist(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Allows a guild to use the bot.
    #[poise::command(slash_command, rename = "add")]
    pub async fn whitelist_add(
        ctx: Context<'_>,
        #[description = "Guild id (defaults to this guild)"] guild_id: Option<String>,
    ) -> Result<()> {
        let Some(id) = resolve_guild(&ctx, guild_id.as_deref()) else {
            ctx.say("Provide a valid guild id, or run this inside the guild.")
                .await?;
            return Ok(());
        };

        if whitelist_ops::add_guild(&ctx.data().database, id).await? {
            ctx.data().whitelist.write().await.insert(id);
            ctx.say(format!("Whitelisted guild `{id}`.")).await?;
        } else {
            ctx.say(format!("Guild `{id}` is already whitelisted."))
                .await?;
        }
        Ok(())
    }

    /// Removes a guild from the whitelist.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn whitelist_remove(
        ctx: Context<'_>,
        #[description = "Guild id (defaults to this guild)"] guild_id: Option<String>,
    ) -> Result<()> {
        let Some(id) = resolve_guild(&ctx, guild_id.as_deref()) else {
            ctx.say("Provide a valid guild id, or run this inside the guild.")
                .await?;
            return Ok(());
        };

        if whitelist_ops::remove_guild(&ctx.data().database, id).await? {
            ctx.data().whitelist.write().await.remove(&id);
            ctx.say(format!("Removed guild `{id}` from the whitelist."))
                .await?;
        } else {
            ctx.say(format!("Guild `{id}` was not whitelisted."))
                .await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
