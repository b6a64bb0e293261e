//! Unified error type and crate-wide `Result` alias.
//!
//! Pager sessions distinguish three failure classes: an empty record source
//! (rejected at construction), renderer failures (propagated, the session ends
//! without showing a partial page), and transport failures (propagated, the
//! session ends without retry). Everything else is ordinary application
//! plumbing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    /// The record source handed to a pager had zero entries. Callers are
    /// expected to check and report "nothing found" before building a session.
    #[error("the record source has no entries")]
    EmptySource,

    /// A page renderer failed. The session ends without a partial page.
    #[error("page renderer failed: {0}")]
    Render(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("card value for `{field}` is {length} characters long, maximum is {max}")]
    CardValueTooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Transport (publish/edit/respond) failure from the Discord layer.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Error::Framework(Box::new(value))
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
