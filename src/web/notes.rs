//! Notes pages
//!
//! The entire notes surface is private: every route except the landing
//! page requires an authenticated user, and every lookup is scoped to that
//! user's own notes.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Serialize;

use crate::models::Note;
use crate::services::NoteServiceError;
use crate::web::error::{found, PageError};
use crate::web::forms::{NoteForm, NoteFormData};
use crate::web::middleware::{AppState, CurrentUser, MaybeUser};
use crate::web::templates::PageContext;

/// Redirect target after a successful create, edit, or delete
const SUCCESS_URL: &str = "/notes/done";

#[derive(Debug, Serialize)]
struct HomeContext {}

#[derive(Debug, Serialize)]
struct NoteListContext {
    object_list: Vec<Note>,
}

#[derive(Debug, Serialize)]
struct NoteFormContext {
    form: NoteForm,
    /// Slug of the note being edited; None on the creation page
    edit_slug: Option<String>,
}

#[derive(Debug, Serialize)]
struct NoteDetailContext {
    note: Note,
    author_username: String,
}

#[derive(Debug, Serialize)]
struct NoteDeleteContext {
    note: Note,
}

#[derive(Debug, Serialize)]
struct EmptyContext {}

impl From<NoteServiceError> for PageError {
    fn from(err: NoteServiceError) -> Self {
        match err {
            NoteServiceError::NotFound => PageError::NotFound,
            NoteServiceError::InternalError(e) => PageError::Internal(e),
            // Handlers intercept validation outcomes before converting
            NoteServiceError::DuplicateSlug(_) => {
                PageError::Internal(anyhow::anyhow!("Unhandled duplicate slug"))
            }
        }
    }
}

/// GET / - public landing page
pub async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, PageError> {
    let context = PageContext::new(user.as_ref(), HomeContext {});
    Ok(Html(state.templates.render("home.html", &context)?))
}

/// GET /notes - the requester's own notes
pub async fn note_list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let object_list = state.note_service.list(user.0.id).await?;

    let context = PageContext::new(Some(&user.0), NoteListContext { object_list });
    Ok(Html(state.templates.render("note_list.html", &context)?))
}

/// GET /notes/add - creation form
pub async fn note_add_form(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let context = PageContext::new(
        Some(&user.0),
        NoteFormContext {
            form: NoteForm::empty(),
            edit_slug: None,
        },
    );
    Ok(Html(state.templates.render("note_form.html", &context)?))
}

/// POST /notes/add
pub async fn note_add_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(data): Form<NoteFormData>,
) -> Result<Response, PageError> {
    let mut form = NoteForm::from_data(&data);
    if !form.validate() {
        return render_form(&state, &user, form, None);
    }

    match state
        .note_service
        .create(user.0.id, &data.title, &data.text, &data.slug)
        .await
    {
        Ok(_) => Ok(found(SUCCESS_URL)),
        Err(err @ NoteServiceError::DuplicateSlug(_)) => {
            form.errors.add("slug", err.to_string());
            render_form(&state, &user, form, None)
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /notes/done - post-mutation success page
pub async fn note_success(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Html<String>, PageError> {
    let context = PageContext::new(Some(&user.0), EmptyContext {});
    Ok(Html(state.templates.render("note_success.html", &context)?))
}

/// GET /notes/{slug} - detail, owner only
pub async fn note_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let note = state.note_service.get_owned(&slug, user.0.id).await?;

    let context = PageContext::new(
        Some(&user.0),
        NoteDetailContext {
            note,
            author_username: user.0.username.clone(),
        },
    );
    Ok(Html(state.templates.render("note_detail.html", &context)?))
}

/// GET /notes/{slug}/edit - edit form, owner only
pub async fn note_edit_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let note = state.note_service.get_owned(&slug, user.0.id).await?;

    let context = PageContext::new(
        Some(&user.0),
        NoteFormContext {
            form: NoteForm::from_note(&note),
            edit_slug: Some(note.slug),
        },
    );
    Ok(Html(state.templates.render("note_form.html", &context)?))
}

/// POST /notes/{slug}/edit
pub async fn note_edit_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
    Form(data): Form<NoteFormData>,
) -> Result<Response, PageError> {
    let mut form = NoteForm::from_data(&data);
    if !form.validate() {
        return render_form(&state, &user, form, Some(slug));
    }

    match state
        .note_service
        .edit(&slug, user.0.id, &data.title, &data.text, &data.slug)
        .await
    {
        Ok(_) => Ok(found(SUCCESS_URL)),
        Err(err @ NoteServiceError::DuplicateSlug(_)) => {
            form.errors.add("slug", err.to_string());
            render_form(&state, &user, form, Some(slug))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /notes/{slug}/delete - confirmation page, owner only
pub async fn note_delete_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, PageError> {
    let note = state.note_service.get_owned(&slug, user.0.id).await?;

    let context = PageContext::new(Some(&user.0), NoteDeleteContext { note });
    Ok(Html(state.templates.render("note_delete.html", &context)?))
}

/// POST /notes/{slug}/delete
pub async fn note_delete_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(slug): Path<String>,
) -> Result<Response, PageError> {
    state.note_service.delete(&slug, user.0.id).await?;
    Ok(found(SUCCESS_URL))
}

/// Re-render the note form with validation errors (HTTP 200)
fn render_form(
    state: &AppState,
    user: &CurrentUser,
    form: NoteForm,
    edit_slug: Option<String>,
) -> Result<Response, PageError> {
    let context = PageContext::new(Some(&user.0), NoteFormContext { form, edit_slug });
    Ok(Html(state.templates.render("note_form.html", &context)?).into_response())
}
