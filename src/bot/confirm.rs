//! Yes/no confirmation prompts for destructive commands.

use std::time::Duration;

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use serenity::{
    ButtonStyle, ComponentInteractionCollector, CreateActionRow, CreateButton,
    CreateInteractionResponse, CreateInteractionResponseMessage,
};

use super::Context;
use crate::errors::Result;

const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

/// Asks the invoking user to confirm `prompt` with Yes/No buttons.
///
/// Returns `false` on No and on timeout. Only the invoking user's press
/// counts; the buttons are greyed out once the prompt is resolved.
pub async fn confirm(ctx: Context<'_>, prompt: &str) -> Result<bool> {
    let yes_id = format!("{}:yes", ctx.id());
    let no_id = format!("{}:no", ctx.id());

    let buttons = |disabled: bool| {
        vec![CreateActionRow::Buttons(vec![
            CreateButton::new(&yes_id)
                .label("Yes")
                .style(ButtonStyle::Danger)
                .disabled(disabled),
            CreateButton::new(&no_id)
                .label("No")
                .style(ButtonStyle::Secondary)
                .disabled(disabled),
        ])]
    };

    let handle = ctx
        .send(
            CreateReply::default()
                .content(prompt.to_owned())
                .components(buttons(false)),
        )
        .await?;
    let message_id = handle.message().await?.id;

    let filter_yes = yes_id.clone();
    let filter_no = no_id.clone();
    let author = ctx.author().id;
    let press = ComponentInteractionCollector::new(ctx)
        .message_id(message_id)
        .timeout(CONFIRM_TIMEOUT)
        .filter(move |press| {
            press.user.id == author
                && (press.data.custom_id == filter_yes || press.data.custom_id == filter_no)
        })
        .await;

    match press {
        Some(press) => {
            let confirmed = press.data.custom_id == yes_id;
            press
                .create_response(
                    ctx.serenity_context(),
                    CreateInteractionResponse::UpdateMessage(
                        CreateInteractionResponseMessage::new()
                            .content(if confirmed { "Confirmed." } else { "Cancelled." })
                            .components(buttons(true)),
                    ),
                )
                .await?;
            Ok(confirmed)
        }
        None => {
            handle
                .edit(
                    ctx,
                    CreateReply::default()
                        .content("Timed out.")
                        .components(buttons(true)),
                )
                .await?;
            Ok(false)
        }
    }
}
