//! Note service
//!
//! Business logic for the notes application:
//! - Creation with slug uniqueness checking and slug derivation
//! - Owner-scoped reads, edits, and deletes
//!
//! Every read or mutation of an existing note goes through an owner-scoped
//! lookup, so a note belonging to another user resolves to `NotFound`
//! rather than a permission error. Existence of foreign notes is never
//! disclosed.

use crate::db::repositories::NoteRepository;
use crate::models::{CreateNoteInput, Note, UpdateNoteInput};
use crate::services::translit::slugify;
use anyhow::Context;
use std::sync::Arc;

/// Suffix appended to a rejected slug in the duplicate-slug form error
pub const DUPLICATE_SLUG_WARNING: &str =
    " - такой slug уже существует, придумайте уникальное значение!";

/// Error types for note service operations
#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    /// Note not found within the requester's own notes
    #[error("Note not found")]
    NotFound,

    /// The requested slug is already taken (globally, across all authors)
    #[error("{0}{warning}", warning = DUPLICATE_SLUG_WARNING)]
    DuplicateSlug(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Note service
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    /// Create a note for the given author.
    ///
    /// An empty slug is derived from the title by transliteration. A
    /// caller-supplied slug is rejected when any note already uses it;
    /// derived slugs are inserted as-is and rely on the database UNIQUE
    /// constraint.
    pub async fn create(
        &self,
        author_id: i64,
        title: &str,
        text: &str,
        slug: &str,
    ) -> Result<Note, NoteServiceError> {
        let slug = if slug.trim().is_empty() {
            slugify(title)
        } else {
            let slug = slug.trim().to_string();
            if self
                .repo
                .exists_by_slug(&slug)
                .await
                .context("Failed to check slug uniqueness")?
            {
                return Err(NoteServiceError::DuplicateSlug(slug));
            }
            slug
        };

        let note = self
            .repo
            .create(&CreateNoteInput {
                title: title.to_string(),
                text: text.to_string(),
                slug,
                author_id,
            })
            .await
            .context("Failed to create note")?;

        tracing::debug!("Created note '{}' for user {}", note.slug, author_id);

        Ok(note)
    }

    /// Get a note by slug, visible only to its author.
    pub async fn get_owned(&self, slug: &str, author_id: i64) -> Result<Note, NoteServiceError> {
        self.repo
            .get_by_slug_for_author(slug, author_id)
            .await
            .context("Failed to load note")?
            .ok_or(NoteServiceError::NotFound)
    }

    /// List all notes owned by the given author.
    pub async fn list(&self, author_id: i64) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self
            .repo
            .list_by_author(author_id)
            .await
            .context("Failed to list notes")?)
    }

    /// Edit a note identified by slug, on behalf of its author.
    ///
    /// Uniqueness of a changed slug is checked against all other notes.
    pub async fn edit(
        &self,
        slug: &str,
        author_id: i64,
        title: &str,
        text: &str,
        new_slug: &str,
    ) -> Result<Note, NoteServiceError> {
        let note = self.get_owned(slug, author_id).await?;

        let new_slug = if new_slug.trim().is_empty() {
            slugify(title)
        } else {
            new_slug.trim().to_string()
        };

        if self
            .repo
            .exists_by_slug_excluding(&new_slug, note.id)
            .await
            .context("Failed to check slug uniqueness")?
        {
            return Err(NoteServiceError::DuplicateSlug(new_slug));
        }

        self.repo
            .update(
                note.id,
                &UpdateNoteInput {
                    title: title.to_string(),
                    text: text.to_string(),
                    slug: new_slug,
                },
            )
            .await
            .context("Failed to update note")?
            .ok_or(NoteServiceError::NotFound)
    }

    /// Delete a note identified by slug, on behalf of its author.
    pub async fn delete(&self, slug: &str, author_id: i64) -> Result<(), NoteServiceError> {
        let note = self.get_owned(slug, author_id).await?;

        self.repo
            .delete(note.id)
            .await
            .context("Failed to delete note")?;

        tracing::debug!("Deleted note '{}' for user {}", slug, author_id);

        Ok(())
    }
}
