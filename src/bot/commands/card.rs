//! Flashcard commands - saving cards and browsing them in pager sessions.
//!
//! `/card list` pages through chunks of cards, `/card search` walks matches
//! one at a time with a delete button attached, and both run the same pager
//! core over a Discord transport.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, confirm::confirm, transport::DiscordTransport},
        core::{
            cards,
            pager::{CustomAction, DisplayPage, HandlerFuture, Pager, SideEffect},
            records,
        },
        entities::card,
        errors::Result,
    };

    /// Flashcard commands.
    #[poise::command(
        slash_command,
        subcommands("add", "list", "search", "delete"),
        subcommand_required
    )]
    pub async fn card(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Saves a new card.
    #[poise::command(slash_command)]
    pub async fn add(
        ctx: Context<'_>,
        #[description = "Front side (the prompt)"] front: String,
        #[description = "Back side (the answer)"] back: String,
    ) -> Result<()> {
        let user_id = ctx.author().id.to_string();
        let saved = cards::add_card(&ctx.data().database, user_id.clone(), &front, &back).await?;
        let total = cards::count_cards(&ctx.data().database, &user_id).await?;
        ctx.say(format!(
            "Saved card #{}: **{}** ({total} in your deck)",
            saved.id, saved.front
        ))
        .await?;
        Ok(())
    }

    /// Browse your saved cards a page at a time.
    #[poise::command(slash_command)]
    pub async fn list(ctx: Context<'_>) -> Result<()> {
        let user_id = ctx.author().id;
        let rows = cards::get_cards_for_user(&ctx.data().database, &user_id.to_string()).await?;
        if rows.is_empty() {
            ctx.say("You have no saved cards yet. Use `/card add` to save one.")
                .await?;
            return Ok(());
        }

        let pages = records::chunk_rows(rows, ctx.data().settings.cards_per_page);
        let renderer =
            |chunk: &Vec<card::Model>, position: usize, total: usize| -> Result<DisplayPage> {
                let mut page =
                    DisplayPage::new("Your cards", "").footer(format!("Page {position}/{total}"));
                for card in chunk {
                    page = page.field(
                        format!("#{} {}", card.id, card.front),
                        card.back.clone(),
                        false,
                    );
                }
                Ok(page)
            };

        let mut pager = Pager::new(pages, renderer, user_id.get())?
            .timeout(ctx.data().settings.session_timeout())
            .with_stop();
        let mut transport = DiscordTransport::new(ctx);
        pager.run(&mut transport).await
    }

    /// Browse cards matching a query, one card per page, with a delete
    /// button.
    #[poise::command(slash_command)]
    pub async fn search(
        ctx: Context<'_>,
        #[description = "Text to match against either side"] query: String,
    ) -> Result<()> {
        let user_id = ctx.author().id;
        let rows = cards::search_cards(&ctx.data().database, &user_id.to_string(), &query).await?;
        if rows.is_empty() {
            ctx.say(format!("No cards match `{query}`.")).await?;
            return Ok(());
        }

        let renderer =
            |card: &card::Model, position: usize, total: usize| -> Result<DisplayPage> {
                Ok(
                    DisplayPage::new(format!("#{} {}", card.id, card.front), card.back.clone())
                        .footer(format!("Match {position}/{total}")),
                )
            };

        let db = ctx.data().database.clone();
        let owner = user_id.to_string();
        let delete = CustomAction::new("delete", "Delete", move |card: &card::Model| {
            let db = db.clone();
            let owner = owner.clone();
            let card_id = card.id;
            Box::pin(async move {
                if cards::delete_card(&db, &owner, card_id).await? {
                    Ok(SideEffect::Acknowledge(format!("Deleted card #{card_id}.")))
                } else {
                    Ok(SideEffect::Acknowledge(format!(
                        "Card #{card_id} is already gone."
                    )))
                }
            }) as HandlerFuture<'_>
        })
        .emoji("🗑️");

        let mut pager = Pager::new(rows, renderer, user_id.get())?
            .timeout(ctx.data().settings.session_timeout())
            .action(delete)
            .with_stop();
        let mut transport = DiscordTransport::new(ctx);
        pager.run(&mut transport).await
    }

    /// Deletes one of your cards by id, after confirmation.
    #[poise::command(slash_command)]
    pub async fn delete(
        ctx: Context<'_>,
        #[description = "Card id to delete"] id: i64,
    ) -> Result<()> {
        if !confirm(ctx, &format!("Delete card #{id}? This cannot be undone.")).await? {
            return Ok(());
        }

        let user_id = ctx.author().id.to_string();
        if cards::delete_card(&ctx.data().database, &user_id, id).await? {
            ctx.say(format!("Deleted card #{id}.")).await?;
        } else {
            ctx.say(format!("You have no card #{id}.")).await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
