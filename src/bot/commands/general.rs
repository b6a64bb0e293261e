//! General Discord commands - ping, help, and other utility commands.
//! Simple commands that don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**DeckPager Help**\n\
        Save flashcards and flip through them page by page.\n\n\
        **Card Commands**\n\
        • `/card add <front> <back>` - Saves a new card.\n\
        • `/card list` - Browse your cards a page at a time.\n\
        • `/card search <query>` - Browse matching cards one by one, with a delete button.\n\
        • `/card delete <id>` - Deletes a card after confirmation.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Browsing sessions belong to whoever started them; the buttons ignore \
        everyone else and expire after a couple of minutes of inactivity.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
