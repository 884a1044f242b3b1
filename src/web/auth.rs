//! Authentication pages
//!
//! Login, logout, and signup. Login honors a `next` parameter so the
//! middleware can bounce anonymous requests back to where they started.

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::{Deserialize, Serialize};

use crate::services::UserServiceError;
use crate::web::error::{found, PageError};
use crate::web::forms::{LoginForm, LoginFormData, SignupForm, SignupFormData};
use crate::web::middleware::{
    clear_session_cookie, extract_session_token, session_cookie, AppState, MaybeUser,
};
use crate::web::templates::PageContext;

/// Where a fresh login lands when no `next` parameter was supplied
const DEFAULT_AFTER_LOGIN: &str = "/notes";

#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: String,
}

#[derive(Debug, Serialize)]
struct LoginContext {
    form: LoginForm,
}

#[derive(Debug, Serialize)]
struct SignupContext {
    form: SignupForm,
}

#[derive(Debug, Serialize)]
struct EmptyContext {}

/// Pick the post-login redirect target; only same-site paths are honored.
fn after_login_target(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        DEFAULT_AFTER_LOGIN
    }
}

/// Attach a Set-Cookie header to a response.
fn with_cookie(mut response: Response, cookie: &str) -> Result<Response, PageError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| PageError::Internal(anyhow::anyhow!("Invalid cookie value: {}", e)))?;
    response.headers_mut().append(header::SET_COOKIE, value);
    Ok(response)
}

/// GET /auth/login
pub async fn login_form(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Query(query): Query<NextQuery>,
) -> Result<Html<String>, PageError> {
    let context = PageContext::new(
        user.as_ref(),
        LoginContext {
            form: LoginForm::empty(&query.next),
        },
    );
    Ok(Html(state.templates.render("login.html", &context)?))
}

/// POST /auth/login
pub async fn login_submit(
    State(state): State<AppState>,
    Form(data): Form<LoginFormData>,
) -> Result<Response, PageError> {
    match state.user_service.login(&data.username, &data.password).await {
        Ok(session) => {
            let response = found(after_login_target(&data.next));
            with_cookie(response, &session_cookie(&session.id))
        }
        Err(UserServiceError::AuthenticationError(_)) => {
            let mut form = LoginForm::from_data(&data);
            form.errors
                .add_non_field("Неверное имя пользователя или пароль.");
            let context = PageContext::new(None, LoginContext { form });
            Ok(Html(state.templates.render("login.html", &context)?).into_response())
        }
        Err(e) => Err(PageError::Internal(e.into())),
    }
}

/// GET /auth/logout
///
/// Destroys the session (when one exists), expires the cookie, and renders
/// the logged-out page.
pub async fn logout(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Response, PageError> {
    if let Some(token) = extract_session_token(&headers) {
        state
            .user_service
            .logout(&token)
            .await
            .map_err(|e| PageError::Internal(e.into()))?;
    }

    let context = PageContext::new(None, EmptyContext {});
    let html = Html(state.templates.render("logout.html", &context)?);
    with_cookie(html.into_response(), &clear_session_cookie())
}

/// GET /auth/signup
pub async fn signup_form(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<Html<String>, PageError> {
    let context = PageContext::new(
        user.as_ref(),
        SignupContext {
            form: SignupForm::empty(),
        },
    );
    Ok(Html(state.templates.render("signup.html", &context)?))
}

/// POST /auth/signup
///
/// Creates the account and logs it in immediately.
pub async fn signup_submit(
    State(state): State<AppState>,
    Form(data): Form<SignupFormData>,
) -> Result<Response, PageError> {
    let mut form = SignupForm::from_data(&data);
    if !form.validate(&data.password) {
        let context = PageContext::new(None, SignupContext { form });
        return Ok(Html(state.templates.render("signup.html", &context)?).into_response());
    }

    let user = match state.user_service.signup(&data.username, &data.password).await {
        Ok(user) => user,
        Err(UserServiceError::UserExists(message)) => {
            form.errors.add("username", message);
            let context = PageContext::new(None, SignupContext { form });
            return Ok(Html(state.templates.render("signup.html", &context)?).into_response());
        }
        Err(UserServiceError::ValidationError(message)) => {
            form.errors.add_non_field(message);
            let context = PageContext::new(None, SignupContext { form });
            return Ok(Html(state.templates.render("signup.html", &context)?).into_response());
        }
        Err(e) => return Err(PageError::Internal(e.into())),
    };

    let session = state
        .user_service
        .create_session(user.id)
        .await
        .map_err(|e| PageError::Internal(e.into()))?;

    let response = found(DEFAULT_AFTER_LOGIN);
    with_cookie(response, &session_cookie(&session.id))
}
