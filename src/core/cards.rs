//! Card business logic - saving, querying, and deleting a user's flashcards.
//!
//! Every operation here is scoped to one Discord user: cards are private, and
//! a user can never list, search, or delete anyone else's cards. Values are
//! validated for length before they hit the database so commands can report
//! the problem to the user instead of a driver error.

use crate::{
    entities::{Card, card},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Longest value accepted for either side of a card.
pub const MAX_CARD_VALUE_LEN: usize = 300;

fn validate_value(field: &'static str, value: &str) -> Result<()> {
    let length = value.chars().count();
    if length > MAX_CARD_VALUE_LEN {
        return Err(Error::CardValueTooLong {
            field,
            length,
            max: MAX_CARD_VALUE_LEN,
        });
    }
    Ok(())
}

/// Saves a new card for `user_id`. Both sides are trimmed and must fit in
/// [`MAX_CARD_VALUE_LEN`] characters.
pub async fn add_card(
    db: &DatabaseConnection,
    user_id: String,
    front: &str,
    back: &str,
) -> Result<card::Model> {
    let front = front.trim();
    let back = back.trim();
    validate_value("front", front)?;
    validate_value("back", back)?;

    let model = card::ActiveModel {
        user_id: Set(user_id),
        front: Set(front.to_owned()),
        back: Set(back.to_owned()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all of a user's cards, oldest first so list pages keep a stable
/// order across sessions.
pub async fn get_cards_for_user(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<card::Model>> {
    Card::find()
        .filter(card::Column::UserId.eq(user_id))
        .order_by_asc(card::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a user's cards whose front or back contains `needle`
/// (case-insensitive), oldest first.
pub async fn search_cards(
    db: &DatabaseConnection,
    user_id: &str,
    needle: &str,
) -> Result<Vec<card::Model>> {
    let needle = needle.trim();
    Card::find()
        .filter(card::Column::UserId.eq(user_id))
        .filter(
            card::Column::Front
                .contains(needle)
                .or(card::Column::Back.contains(needle)),
        )
        .order_by_asc(card::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts a user's saved cards.
pub async fn count_cards(db: &DatabaseConnection, user_id: &str) -> Result<u64> {
    Card::find()
        .filter(card::Column::UserId.eq(user_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of the user's cards by id. Returns `false` when no card with
/// that id belongs to the user, so commands can tell "deleted" from "not
/// yours / not found" without a second query.
pub async fn delete_card(db: &DatabaseConnection, user_id: &str, card_id: i64) -> Result<bool> {
    let deleted = Card::delete_many()
        .filter(card::Column::Id.eq(card_id))
        .filter(card::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(deleted.rows_affected > 0)
}
