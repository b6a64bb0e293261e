//! `DeckPager` - a Discord flashcard bot built around a reusable pager core
//!
//! The heart of this crate is [`core::pager`]: a transport-agnostic session
//! navigator that walks a single user through a finite, ordered snapshot of
//! entries one page at a time, with clamped navigation, an inactivity
//! deadline, and caller-supplied side-effecting actions. The Discord layer
//! supplies the transport (embeds plus button rows) and the flashcard deck
//! supplies the record sources.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::inefficient_to_string,
    clippy::needless_pass_by_value,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::unwrap_used,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

// Note: `missing_docs` is set to `warn` instead of `deny` because
// macro-generated code (e.g., `poise::command`) doesn't include docs.

/// Discord bot interface - commands, transport, prompts, and bot context
pub mod bot;
/// Configuration management for database and application settings
pub mod config;
/// Core logic - the pager state machine, record shaping, deck and whitelist operations
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
