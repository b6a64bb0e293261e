//! The Discord-backed pager transport.
//!
//! Pages become embeds, controls become button rows, and actions arrive as
//! component interactions collected from the session's own message. Custom
//! ids are namespaced with the invoking interaction id so concurrent sessions
//! in the same channel never see each other's presses. Discord demands a
//! response to every press, so each `next_action` leaves the raw interaction
//! pending and the following transport call answers it: `update` edits the
//! message through it, `acknowledge` and `reject` respond on the side, and
//! `disable_controls` greys the buttons out.

use std::time::Duration;

use poise::serenity_prelude as serenity;
use poise::{CreateReply, ReplyHandle};
use serenity::{
    ButtonStyle, ComponentInteraction, ComponentInteractionCollector, CreateActionRow,
    CreateButton, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage, MessageId, ReactionType,
};
use tracing::debug;

use super::Context;
use crate::core::pager::{Action, Control, DisplayPage, Incoming, Transport};
use crate::errors::{Error, Result};

/// Reserved custom-id suffixes. Custom actions must not use these as ids.
const PREVIOUS_SUFFIX: &str = "prev";
const NEXT_SUFFIX: &str = "next";
const STOP_SUFFIX: &str = "stop";

/// Discord has a hard cap of five buttons per action row.
const BUTTONS_PER_ROW: usize = 5;

fn parse_action(prefix: &str, custom_id: &str) -> Action {
    match custom_id.strip_prefix(prefix).unwrap_or(custom_id) {
        PREVIOUS_SUFFIX => Action::Previous,
        NEXT_SUFFIX => Action::Next,
        STOP_SUFFIX => Action::Stop,
        other => Action::Custom(other.to_owned()),
    }
}

/// One pager session's connection to Discord, bound to the invoking command
/// context.
pub struct DiscordTransport<'a> {
    ctx: Context<'a>,
    prefix: String,
    handle: Option<ReplyHandle<'a>>,
    message_id: Option<MessageId>,
    pending: Option<ComponentInteraction>,
    last: Option<(DisplayPage, Vec<Control>)>,
}

impl<'a> DiscordTransport<'a> {
    /// Creates a transport for the session started by `ctx`.
    #[must_use]
    pub fn new(ctx: Context<'a>) -> Self {
        Self {
            ctx,
            prefix: format!("{}:", ctx.id()),
            handle: None,
            message_id: None,
            pending: None,
            last: None,
        }
    }

    fn custom_id(&self, action: &Action) -> String {
        let suffix = match action {
            Action::Previous => PREVIOUS_SUFFIX,
            Action::Next => NEXT_SUFFIX,
            Action::Stop => STOP_SUFFIX,
            Action::Custom(id) => id.as_str(),
        };
        format!("{}{suffix}", self.prefix)
    }

    fn embed(page: &DisplayPage) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(page.title.clone())
            .description(page.description.clone())
            .fields(
                page.fields
                    .iter()
                    .map(|f| (f.name.clone(), f.value.clone(), f.inline)),
            );
        if let Some(url) = &page.url {
            embed = embed.url(url.clone());
        }
        if let Some(footer) = &page.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer.clone()));
        }
        embed
    }

    fn rows(&self, controls: &[Control]) -> Vec<CreateActionRow> {
        controls
            .chunks(BUTTONS_PER_ROW)
            .map(|chunk| {
                CreateActionRow::Buttons(chunk.iter().map(|c| self.button(c)).collect())
            })
            .collect()
    }

    fn button(&self, control: &Control) -> CreateButton {
        let style = match control.action {
            Action::Previous | Action::Next => ButtonStyle::Secondary,
            Action::Stop => ButtonStyle::Danger,
            Action::Custom(_) => ButtonStyle::Primary,
        };
        let mut button = CreateButton::new(self.custom_id(&control.action))
            .label(control.label.clone())
            .style(style)
            .disabled(control.disabled);
        if let Some(emoji) = &control.emoji {
            button = button.emoji(ReactionType::Unicode(emoji.clone()));
        }
        button
    }

    fn reply(page: &DisplayPage, rows: Vec<CreateActionRow>) -> CreateReply {
        CreateReply::default()
            .embed(Self::embed(page))
            .components(rows)
    }

    async fn respond(&self, press: &ComponentInteraction, response: CreateInteractionResponse) -> Result<()> {
        press
            .create_response(self.ctx.serenity_context(), response)
            .await
            .map_err(Into::into)
    }
}

impl Transport for DiscordTransport<'_> {
    async fn publish(&mut self, page: &DisplayPage, controls: &[Control]) -> Result<()> {
        let handle = self.ctx.send(Self::reply(page, self.rows(controls))).await?;
        self.message_id = Some(handle.message().await?.id);
        self.handle = Some(handle);
        self.last = Some((page.clone(), controls.to_vec()));
        Ok(())
    }

    async fn update(&mut self, page: &DisplayPage, controls: &[Control]) -> Result<()> {
        let rows = self.rows(controls);
        if let Some(press) = self.pending.take() {
            self.respond(
                &press,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(Self::embed(page))
                        .components(rows),
                ),
            )
            .await?;
        } else if let Some(handle) = &self.handle {
            handle.edit(self.ctx, Self::reply(page, rows)).await?;
        }
        self.last = Some((page.clone(), controls.to_vec()));
        Ok(())
    }

    async fn acknowledge(&mut self, note: Option<&str>) -> Result<()> {
        let Some(press) = self.pending.take() else {
            return Ok(());
        };
        let response = match note {
            // The note is a side-channel message; the page itself is
            // untouched, so it goes out ephemeral.
            Some(note) => CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(note)
                    .ephemeral(true),
            ),
            None => CreateInteractionResponse::Acknowledge,
        };
        self.respond(&press, response).await
    }

    async fn reject(&mut self, reason: &str) -> Result<()> {
        let Some(press) = self.pending.take() else {
            return Ok(());
        };
        self.respond(
            &press,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(reason)
                    .ephemeral(true),
            ),
        )
        .await
    }

    async fn disable_controls(&mut self) -> Result<()> {
        let Some((page, controls)) = self.last.clone() else {
            return Ok(());
        };
        let disabled: Vec<Control> = controls
            .into_iter()
            .map(|mut c| {
                c.disabled = true;
                c
            })
            .collect();
        let rows = self.rows(&disabled);

        // Best effort: the session is over either way, and the underlying
        // message may already be gone.
        let outcome: Result<()> = if let Some(press) = self.pending.take() {
            self.respond(
                &press,
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .embed(Self::embed(&page))
                        .components(rows),
                ),
            )
            .await
        } else if let Some(handle) = &self.handle {
            handle
                .edit(self.ctx, Self::reply(&page, rows))
                .await
                .map_err(Error::from)
        } else {
            Ok(())
        };
        if let Err(e) = outcome {
            debug!("could not disable controls on a finished session: {e}");
        }
        Ok(())
    }

    async fn next_action(&mut self, wait: Duration) -> Result<Option<Incoming>> {
        let Some(message_id) = self.message_id else {
            return Ok(None);
        };
        let prefix = self.prefix.clone();
        let press = ComponentInteractionCollector::new(self.ctx)
            .message_id(message_id)
            .timeout(wait)
            .filter(move |press| press.data.custom_id.starts_with(&prefix))
            .await;
        let Some(press) = press else {
            return Ok(None);
        };

        let action = parse_action(&self.prefix, &press.data.custom_id);
        let actor = press.user.id.get();
        self.pending = Some(press);
        Ok(Some(Incoming { actor, action }))
    }
}
