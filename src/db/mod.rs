//! Database layer
//!
//! This module provides database access for the Zametki web service.
//! Storage is SQLite via sqlx; the schema is owned by the embedded
//! code-based migrations in [`migrations`].

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
