//! Card entity - a user's saved flashcard.
//!
//! Cards are private to the user who saved them; every query against this
//! table is scoped by `user_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Card database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    /// Unique identifier for the card
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID of the card's owner
    pub user_id: String,
    /// Front side of the card (the prompt)
    pub front: String,
    /// Back side of the card (the answer)
    pub back: String,
    /// When the card was saved
    pub created_at: ChronoDateTimeUtc,
}

/// Defines relationships between Card and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
