//! News pages and comment flows
//!
//! The news board is public for reading. Commenting requires a login;
//! editing and deleting a comment additionally require being its author,
//! enforced through owner-scoped lookups (foreign comments resolve to
//! 404).

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Serialize;

use crate::models::{Comment, News, NewsWithComments};
use crate::services::CommentServiceError;
use crate::web::error::{found, PageError};
use crate::web::forms::{CommentForm, CommentFormData};
use crate::web::middleware::{AppState, CurrentUser, MaybeUser};
use crate::web::templates::PageContext;

#[derive(Debug, Serialize)]
struct NewsListContext {
    object_list: Vec<News>,
}

#[derive(Debug, Serialize)]
struct NewsDetailContext {
    #[serde(flatten)]
    detail: NewsWithComments,
    /// Comment form; present only for authenticated requesters
    form: Option<CommentForm>,
}

#[derive(Debug, Serialize)]
struct CommentEditContext {
    comment: Comment,
    form: CommentForm,
}

#[derive(Debug, Serialize)]
struct CommentDeleteContext {
    comment: Comment,
}

impl From<CommentServiceError> for PageError {
    fn from(err: CommentServiceError) -> Self {
        match err {
            CommentServiceError::NotFound => PageError::NotFound,
            CommentServiceError::InternalError(e) => PageError::Internal(e),
            // Handlers intercept moderation outcomes before converting
            CommentServiceError::ForbiddenWord => {
                PageError::Internal(anyhow::anyhow!("Unhandled moderation rejection"))
            }
        }
    }
}

/// Anchor used when bouncing back to a news item's comment thread
fn comments_url(news_id: i64) -> String {
    format!("/news/{}#comments", news_id)
}

/// GET /news - latest news, bounded and date descending
pub async fn news_home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, PageError> {
    let object_list = state.news_service.home_page().await?;

    let context = PageContext::new(user.as_ref(), NewsListContext { object_list });
    Ok(Html(state.templates.render("news_list.html", &context)?))
}

/// GET /news/{id} - article with its comment thread
pub async fn news_detail(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let detail = state
        .news_service
        .get_with_comments(id)
        .await?
        .ok_or(PageError::NotFound)?;

    let form = user.as_ref().map(|_| CommentForm::empty());
    let context = PageContext::new(user.as_ref(), NewsDetailContext { detail, form });
    Ok(Html(state.templates.render("news_detail.html", &context)?))
}

/// POST /news/{id}/comments - create a comment
pub async fn comment_create(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Form(data): Form<CommentFormData>,
) -> Result<Response, PageError> {
    // The parent article must exist regardless of the form's validity
    let detail = state
        .news_service
        .get_with_comments(id)
        .await?
        .ok_or(PageError::NotFound)?;

    let mut form = CommentForm::from_data(&data);
    if !form.validate() {
        return render_detail(&state, &user, detail, form);
    }

    match state
        .comment_service
        .create(id, user.0.id, &data.text)
        .await
    {
        Ok(_) => Ok(found(&comments_url(id))),
        Err(err @ CommentServiceError::ForbiddenWord) => {
            form.errors.add("text", err.to_string());
            render_detail(&state, &user, detail, form)
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /comments/{id}/edit - edit form, author only
pub async fn comment_edit_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let comment = state.comment_service.get_owned(id, user.0.id).await?;

    let form = CommentForm::with_text(&comment.text);
    let context = PageContext::new(Some(&user.0), CommentEditContext { comment, form });
    Ok(Html(state.templates.render("comment_edit.html", &context)?))
}

/// POST /comments/{id}/edit
pub async fn comment_edit_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Form(data): Form<CommentFormData>,
) -> Result<Response, PageError> {
    let comment = state.comment_service.get_owned(id, user.0.id).await?;

    let mut form = CommentForm::from_data(&data);
    if !form.validate() {
        return render_edit(&state, &user, comment, form);
    }

    match state.comment_service.edit(id, user.0.id, &data.text).await {
        Ok(updated) => Ok(found(&comments_url(updated.news_id))),
        Err(err @ CommentServiceError::ForbiddenWord) => {
            form.errors.add("text", err.to_string());
            render_edit(&state, &user, comment, form)
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /comments/{id}/delete - confirmation page, author only
pub async fn comment_delete_form(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let comment = state.comment_service.get_owned(id, user.0.id).await?;

    let context = PageContext::new(Some(&user.0), CommentDeleteContext { comment });
    Ok(Html(
        state.templates.render("comment_delete.html", &context)?,
    ))
}

/// POST or DELETE /comments/{id}/delete
pub async fn comment_delete_submit(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, PageError> {
    let deleted = state.comment_service.delete(id, user.0.id).await?;
    Ok(found(&comments_url(deleted.news_id)))
}

/// Re-render the news detail page with a failed comment form (HTTP 200)
fn render_detail(
    state: &AppState,
    user: &CurrentUser,
    detail: NewsWithComments,
    form: CommentForm,
) -> Result<Response, PageError> {
    let context = PageContext::new(
        Some(&user.0),
        NewsDetailContext {
            detail,
            form: Some(form),
        },
    );
    Ok(Html(state.templates.render("news_detail.html", &context)?).into_response())
}

/// Re-render the comment edit page with a failed form (HTTP 200)
fn render_edit(
    state: &AppState,
    user: &CurrentUser,
    comment: Comment,
    form: CommentForm,
) -> Result<Response, PageError> {
    let context = PageContext::new(Some(&user.0), CommentEditContext { comment, form });
    Ok(Html(state.templates.render("comment_edit.html", &context)?).into_response())
}
