//! Comment repository
//!
//! As with notes, mutation lookups are owner-scoped: a comment fetched for
//! edit or delete is filtered on `author_id`, so other users' comments are
//! simply not found.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::{Comment, CommentWithAuthor, CreateCommentInput};

/// Comment repository trait
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Create a new comment
    async fn create(&self, input: &CreateCommentInput) -> Result<Comment>;

    /// Get a comment by ID regardless of author
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>>;

    /// Get a comment by ID, visible only to its author
    async fn get_by_id_for_author(&self, id: i64, author_id: i64) -> Result<Option<Comment>>;

    /// All comments under a news item, created ascending
    async fn list_by_news(&self, news_id: i64) -> Result<Vec<CommentWithAuthor>>;

    /// Update a comment's text
    async fn update_text(&self, id: i64, text: &str) -> Result<Option<Comment>>;

    /// Delete a comment
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count all comments
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based comment repository implementation
pub struct SqlxCommentRepository {
    pool: SqlitePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn CommentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, input: &CreateCommentInput) -> Result<Comment> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO comments (news_id, author_id, text, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.news_id)
        .bind(input.author_id)
        .bind(&input.text)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create comment")?;

        Ok(Comment {
            id: result.last_insert_rowid(),
            news_id: input.news_id,
            author_id: input.author_id,
            text: input.text.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, news_id, author_id, text, created_at, updated_at \
             FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment by ID")?;

        Ok(row.map(|r| row_to_comment(&r)))
    }

    async fn get_by_id_for_author(&self, id: i64, author_id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, news_id, author_id, text, created_at, updated_at \
             FROM comments WHERE id = ? AND author_id = ?",
        )
        .bind(id)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get comment by ID")?;

        Ok(row.map(|r| row_to_comment(&r)))
    }

    async fn list_by_news(&self, news_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.news_id, c.author_id, c.text, c.created_at, u.username
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.news_id = ?
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list comments")?;

        Ok(rows
            .iter()
            .map(|r| CommentWithAuthor {
                id: r.get("id"),
                news_id: r.get("news_id"),
                author_id: r.get("author_id"),
                author_username: r.get("username"),
                text: r.get("text"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    async fn update_text(&self, id: i64, text: &str) -> Result<Option<Comment>> {
        let result = sqlx::query("UPDATE comments SET text = ?, updated_at = ? WHERE id = ?")
            .bind(text)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update comment")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete comment")?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comments")?;

        Ok(count)
    }
}

fn row_to_comment(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        news_id: row.get("news_id"),
        author_id: row.get("author_id"),
        text: row.get("text"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
