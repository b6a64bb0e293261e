/// Database configuration and connection management
pub mod database;

/// Bot settings loading from config.toml
pub mod settings;
