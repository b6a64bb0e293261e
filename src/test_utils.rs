//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and seeding them
//! with cards.

use crate::{core::cards, entities, errors::Result};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Saves a card for `user_id` with the given sides.
pub async fn create_test_card(
    db: &DatabaseConnection,
    user_id: &str,
    front: &str,
    back: &str,
) -> Result<entities::card::Model> {
    cards::add_card(db, user_id.to_string(), front, back).await
}
