//! Page-level error responses
//!
//! Handlers return `PageError` for everything that is not a rendered page:
//! hidden resources (404), login redirects for anonymous users, and
//! internal failures.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Error response for HTML pages
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The resource does not exist within the requester's visible subset
    #[error("Page not found")]
    NotFound,

    /// Anonymous access to an authenticated route; carries the original
    /// request path for the `next` parameter
    #[error("Login required")]
    LoginRedirect(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (
                StatusCode::NOT_FOUND,
                Html("<h1>Страница не найдена (404)</h1>".to_string()),
            )
                .into_response(),
            PageError::LoginRedirect(next) => found(&format!("/auth/login?next={}", next)),
            PageError::Internal(e) => {
                tracing::error!("Internal error while handling request: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<h1>Внутренняя ошибка сервера</h1>".to_string()),
                )
                    .into_response()
            }
        }
    }
}

/// Build a plain 302 Found redirect.
///
/// axum's `Redirect` answers 303 for `to`; the form flows here follow the
/// classic 302 post/redirect/get convention, so the response is built
/// directly.
pub fn found(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}
