//! Whitelist entity - guilds allowed to use the bot's commands.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whitelist database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "whitelist")]
pub struct Model {
    /// Discord guild ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
}

/// Defines relationships between Whitelist and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
