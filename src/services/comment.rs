//! Comment service
//!
//! Business logic for comments under news items:
//! - Content moderation against a fixed forbidden-word list
//! - Author-only edits and deletes via owner-scoped lookups

use crate::db::repositories::CommentRepository;
use crate::models::{Comment, CommentWithAuthor, CreateCommentInput};
use anyhow::Context;
use std::sync::Arc;

/// Words that may not appear in comment text. Matching is a case-sensitive
/// substring check.
pub const FORBIDDEN_WORDS: &[&str] = &["редиска", "негодяй"];

/// Form error attached to the text field when moderation rejects a comment
pub const FORBIDDEN_WARNING: &str = "Не ругайтесь!";

/// Error types for comment service operations
#[derive(Debug, thiserror::Error)]
pub enum CommentServiceError {
    /// Comment not found among the requester's own comments
    #[error("Comment not found")]
    NotFound,

    /// The text contains a forbidden word
    #[error("{}", FORBIDDEN_WARNING)]
    ForbiddenWord,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Check whether the text contains any forbidden word.
pub fn contains_forbidden_word(text: &str) -> bool {
    FORBIDDEN_WORDS.iter().any(|word| text.contains(word))
}

/// Comment service
pub struct CommentService {
    repo: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repo: Arc<dyn CommentRepository>) -> Self {
        Self { repo }
    }

    /// Create a comment after moderation.
    pub async fn create(
        &self,
        news_id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, CommentServiceError> {
        if contains_forbidden_word(text) {
            return Err(CommentServiceError::ForbiddenWord);
        }

        let comment = self
            .repo
            .create(&CreateCommentInput {
                news_id,
                author_id,
                text: text.to_string(),
            })
            .await
            .context("Failed to create comment")?;

        tracing::debug!(
            "Created comment {} on news {} by user {}",
            comment.id,
            news_id,
            author_id
        );

        Ok(comment)
    }

    /// Get a comment by ID, visible only to its author.
    pub async fn get_owned(
        &self,
        id: i64,
        author_id: i64,
    ) -> Result<Comment, CommentServiceError> {
        self.repo
            .get_by_id_for_author(id, author_id)
            .await
            .context("Failed to load comment")?
            .ok_or(CommentServiceError::NotFound)
    }

    /// Edit a comment on behalf of its author. The new text is moderated
    /// the same way as on creation.
    pub async fn edit(
        &self,
        id: i64,
        author_id: i64,
        text: &str,
    ) -> Result<Comment, CommentServiceError> {
        let comment = self.get_owned(id, author_id).await?;

        if contains_forbidden_word(text) {
            return Err(CommentServiceError::ForbiddenWord);
        }

        self.repo
            .update_text(comment.id, text)
            .await
            .context("Failed to update comment")?
            .ok_or(CommentServiceError::NotFound)
    }

    /// Delete a comment on behalf of its author.
    pub async fn delete(&self, id: i64, author_id: i64) -> Result<Comment, CommentServiceError> {
        let comment = self.get_owned(id, author_id).await?;

        self.repo
            .delete(comment.id)
            .await
            .context("Failed to delete comment")?;

        Ok(comment)
    }

    /// All comments under a news item, created ascending.
    pub async fn list_for_news(
        &self,
        news_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, CommentServiceError> {
        Ok(self
            .repo
            .list_by_news(news_id)
            .await
            .context("Failed to list comments")?)
    }
}
