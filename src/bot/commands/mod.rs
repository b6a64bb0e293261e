//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Flashcard commands
pub mod card;

/// General utility commands
pub mod general;

/// Owner-only guild whitelist management
pub mod manage;

// Export commands
pub use card::*;
pub use general::*;
pub use manage::*;
