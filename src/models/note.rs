//! Note model
//!
//! A note is a slug-addressed text record owned by exactly one user.
//! Notes are only ever visible to their author.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note body
    pub text: String,
    /// URL-friendly slug (unique across all authors)
    pub slug: String,
    /// Owning user ID
    pub author_id: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new note
#[derive(Debug, Clone)]
pub struct CreateNoteInput {
    pub title: String,
    pub text: String,
    /// Caller-supplied slug; derived from the title when empty
    pub slug: String,
    pub author_id: i64,
}

/// Input for updating an existing note
#[derive(Debug, Clone)]
pub struct UpdateNoteInput {
    pub title: String,
    pub text: String,
    pub slug: String,
}
