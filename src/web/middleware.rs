//! Web middleware and request identity
//!
//! Contains the shared application state, session-cookie handling, and the
//! middleware/extractors that establish the requesting user:
//! - `load_user` validates the session cookie and stores the user in the
//!   request extensions
//! - `CurrentUser` requires an authenticated user and otherwise redirects
//!   to the login page with a `next` parameter
//! - `MaybeUser` exposes the user without requiring one

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::models::User;
use crate::services::{CommentService, NewsService, NoteService, UserService};
use crate::web::error::PageError;
use crate::web::templates::TemplateEngine;

/// Session cookie name
pub const SESSION_COOKIE: &str = "session";

/// Session cookie lifetime in seconds (must cover the server-side expiry)
const SESSION_COOKIE_MAX_AGE: i64 = 7 * 24 * 60 * 60;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub user_service: Arc<UserService>,
    pub note_service: Arc<NoteService>,
    pub news_service: Arc<NewsService>,
    pub comment_service: Arc<CommentService>,
    pub templates: Arc<TemplateEngine>,
}

/// Authenticated user extracted from the request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Possibly-anonymous requester
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

/// Build the Set-Cookie value establishing a session
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, SESSION_COOKIE_MAX_AGE
    )
}

/// Build the Set-Cookie value clearing the session
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Extract the session token from the Cookie header
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some(token) = cookie.strip_prefix("session=") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    None
}

/// Session-loading middleware.
///
/// Validates the session cookie (when present) and inserts the user into
/// the request extensions. Requests without a valid session pass through
/// anonymously; route handlers decide via the extractors whether that is
/// acceptable.
pub async fn load_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_session_token(request.headers()) {
        match state.user_service.validate_session(&token).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Session validation failed: {}", e),
        }
    }

    next.run(request).await
}

/// The path (with query) of the original request, for login redirects
fn original_path(parts: &Parts) -> String {
    parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| PageError::LoginRedirect(original_path(parts)))
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(
            parts
                .extensions
                .get::<CurrentUser>()
                .map(|current| current.0.clone()),
        ))
    }
}
