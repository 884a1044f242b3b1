//! News model
//!
//! News items are created out-of-band and are read-only from the web
//! surface; readers can only attach comments to them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::comment::CommentWithAuthor;

/// News entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    /// Unique identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Article body
    pub text: String,
    /// Publication date
    pub date: NaiveDate,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a news item
#[derive(Debug, Clone)]
pub struct CreateNewsInput {
    pub title: String,
    pub text: String,
    pub date: NaiveDate,
}

/// A news item together with its comment thread, for the detail page
#[derive(Debug, Clone, Serialize)]
pub struct NewsWithComments {
    pub news: News,
    /// Comments in ascending creation order
    pub comments: Vec<CommentWithAuthor>,
}
