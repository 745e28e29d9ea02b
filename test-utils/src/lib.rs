//! tempvoice Test Utils
//!
//! Provides shared testing utilities for the tempvoice bot. This crate offers a builder
//! for creating test contexts backed by in-memory SQLite databases, factories for
//! inserting configuration rows, and helpers for deserializing Serenity objects the way
//! Discord's gateway would deliver them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::GuildVoiceConfig;
//!
//! #[tokio::test]
//! async fn test_config_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(GuildVoiceConfig)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
