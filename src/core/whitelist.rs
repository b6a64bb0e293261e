//! Whitelist business logic - which guilds may use the bot.
//!
//! The table is tiny and read on every guild command, so the bot layer keeps
//! an in-memory copy and these functions are the single write path that keeps
//! the database authoritative.

use crate::{
    entities::{Whitelist, whitelist},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Adds a guild to the whitelist. Returns `false` if it was already listed.
pub async fn add_guild(db: &DatabaseConnection, guild_id: u64) -> Result<bool> {
    let existing = Whitelist::find_by_id(guild_id.to_string()).one(db).await?;
    if existing.is_some() {
        return Ok(false);
    }

    let model = whitelist::ActiveModel {
        guild_id: Set(guild_id.to_string()),
    };
    model.insert(db).await?;
    Ok(true)
}

/// Removes a guild from the whitelist. Returns `false` if it was not listed.
pub async fn remove_guild(db: &DatabaseConnection, guild_id: u64) -> Result<bool> {
    let deleted = Whitelist::delete_by_id(guild_id.to_string()).exec(db).await?;
    Ok(deleted.rows_affected > 0)
}

/// Loads every whitelisted guild id. Rows that do not parse as ids are
/// skipped rather than failing the whole load.
pub async fn load_guilds(db: &DatabaseConnection) -> Result<Vec<u64>> {
    let rows = Whitelist::find().all(db).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| row.guild_id.parse().ok())
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_and_remove_guild() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(add_guild(&db, 42).await?);
        // Adding the same guild twice is reported, not an error.
        assert!(!add_guild(&db, 42).await?);

        assert!(remove_guild(&db, 42).await?);
        assert!(!remove_guild(&db, 42).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_guilds_returns_all() -> Result<()> {
        let db = setup_test_db().await?;

        add_guild(&db, 1).await?;
        add_guild(&db, 2).await?;
        add_guild(&db, 3).await?;

        let mut guilds = load_guilds(&db).await?;
        guilds.sort_unstable();
        assert_eq!(guilds, vec![1, 2, 3]);

        Ok(())
    }
}
