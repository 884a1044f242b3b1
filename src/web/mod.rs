//! Web layer - HTTP handlers and routing
//!
//! Server-rendered pages for the notes and news applications plus the
//! authentication flows.

pub mod auth;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod news;
pub mod notes;
pub mod templates;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::PageError;
pub use middleware::{AppState, CurrentUser, MaybeUser};
pub use templates::{PageContext, TemplateEngine};

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Landing page
        .route("/", get(notes::home))
        // Notes (all owner-scoped)
        .route("/notes", get(notes::note_list))
        .route(
            "/notes/add",
            get(notes::note_add_form).post(notes::note_add_submit),
        )
        .route("/notes/done", get(notes::note_success))
        .route("/notes/{slug}", get(notes::note_detail))
        .route(
            "/notes/{slug}/edit",
            get(notes::note_edit_form).post(notes::note_edit_submit),
        )
        .route(
            "/notes/{slug}/delete",
            get(notes::note_delete_form).post(notes::note_delete_submit),
        )
        // News and comments
        .route("/news", get(news::news_home))
        .route("/news/{id}", get(news::news_detail))
        .route("/news/{id}/comments", post(news::comment_create))
        .route(
            "/comments/{id}/edit",
            get(news::comment_edit_form).post(news::comment_edit_submit),
        )
        .route(
            "/comments/{id}/delete",
            get(news::comment_delete_form)
                .post(news::comment_delete_submit)
                .delete(news::comment_delete_submit),
        )
        // Authentication
        .route(
            "/auth/login",
            get(auth::login_form).post(auth::login_submit),
        )
        .route("/auth/logout", get(auth::logout))
        .route(
            "/auth/signup",
            get(auth::signup_form).post(auth::signup_submit),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::load_user,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
