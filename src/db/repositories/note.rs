//! Note repository
//!
//! Ownership is enforced at the query level: the lookup used by the web
//! layer always filters on `author_id`, so a note owned by someone else
//! is indistinguishable from a note that does not exist.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::{CreateNoteInput, Note, UpdateNoteInput};

/// Note repository trait
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Create a new note
    async fn create(&self, input: &CreateNoteInput) -> Result<Note>;

    /// Get a note by ID regardless of owner
    async fn get_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// Get a note by slug, visible only to its author
    async fn get_by_slug_for_author(&self, slug: &str, author_id: i64) -> Result<Option<Note>>;

    /// List all notes owned by the given author
    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Note>>;

    /// Check whether any note (by any author) uses the given slug
    async fn exists_by_slug(&self, slug: &str) -> Result<bool>;

    /// Check whether any note other than `note_id` uses the given slug
    async fn exists_by_slug_excluding(&self, slug: &str, note_id: i64) -> Result<bool>;

    /// Update a note's fields
    async fn update(&self, id: i64, input: &UpdateNoteInput) -> Result<Option<Note>>;

    /// Delete a note
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Count all notes
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based note repository implementation
pub struct SqlxNoteRepository {
    pool: SqlitePool,
}

impl SqlxNoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn NoteRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn create(&self, input: &CreateNoteInput) -> Result<Note> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO notes (title, text, slug, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(&input.slug)
        .bind(input.author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create note")?;

        Ok(Note {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            text: input.text.clone(),
            slug: input.slug.clone(),
            author_id: input.author_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT id, title, text, slug, author_id, created_at, updated_at \
             FROM notes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get note by ID")?;

        Ok(row.map(|r| row_to_note(&r)))
    }

    async fn get_by_slug_for_author(&self, slug: &str, author_id: i64) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT id, title, text, slug, author_id, created_at, updated_at \
             FROM notes WHERE slug = ? AND author_id = ?",
        )
        .bind(slug)
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get note by slug")?;

        Ok(row.map(|r| row_to_note(&r)))
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, title, text, slug, author_id, created_at, updated_at \
             FROM notes WHERE author_id = ? ORDER BY created_at",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list notes")?;

        Ok(rows.iter().map(row_to_note).collect())
    }

    async fn exists_by_slug(&self, slug: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE slug = ?")
            .bind(slug)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check slug existence")?;

        Ok(count > 0)
    }

    async fn exists_by_slug_excluding(&self, slug: &str, note_id: i64) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE slug = ? AND id != ?")
                .bind(slug)
                .bind(note_id)
                .fetch_one(&self.pool)
                .await
                .context("Failed to check slug existence")?;

        Ok(count > 0)
    }

    async fn update(&self, id: i64, input: &UpdateNoteInput) -> Result<Option<Note>> {
        let result = sqlx::query(
            "UPDATE notes SET title = ?, text = ?, slug = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(&input.slug)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update note")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete note")?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count notes")?;

        Ok(count)
    }
}

fn row_to_note(row: &sqlx::sqlite::SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        slug: row.get("slug"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
