//! Business logic, independent of Discord.
//!
//! The pager in this module is the heart of the crate: everything in `bot/`
//! is a thin adapter that feeds it Discord interactions.

/// Card persistence and validation
pub mod cards;

/// The pager session state machine
pub mod pager;

/// Shaping query results into pageable snapshots
pub mod records;

/// Guild whitelist persistence
pub mod whitelist;
