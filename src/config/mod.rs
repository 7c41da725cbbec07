/// Database configuration and connection management
pub mod database;

/// Seed data loading from config.toml and initial provisioning
pub mod seed;
