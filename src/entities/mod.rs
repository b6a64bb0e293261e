//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod card;
pub mod whitelist;

// Re-export specific types to avoid conflicts
pub use card::{Column as CardColumn, Entity as Card, Model as CardModel};
pub use whitelist::{Column as WhitelistColumn, Entity as Whitelist, Model as WhitelistModel};
