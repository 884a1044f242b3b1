//! User service
//!
//! Implements business logic for accounts and authentication:
//! - Signup (username + password)
//! - Login/logout with uuid session tokens
//! - Session validation for the request middleware

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{Session, User};
use crate::services::password::{hash_password, verify_password};
use anyhow::Context;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default session expiration time in days
const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// User service for managing accounts and sessions
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_expiration_days: i64,
}

impl UserService {
    /// Create a new user service with the given repositories
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days: DEFAULT_SESSION_EXPIRATION_DAYS,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username or password is empty
    /// - `UserExists` if the username is already taken
    /// - `InternalError` for database errors
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, UserServiceError> {
        let username = username.trim();

        if username.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Укажите имя пользователя".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Укажите пароль".to_string(),
            ));
        }

        if self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(UserServiceError::UserExists(format!(
                "Имя пользователя '{}' уже занято",
                username
            )));
        }

        let password_hash = hash_password(password).context("Failed to hash password")?;
        let user = User::new(username.to_string(), password_hash);

        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        tracing::info!("Registered user '{}'", created.username);

        Ok(created)
    }

    /// Login with credentials, creating a new session on success.
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` if the username is unknown or the password
    ///   does not match
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username.trim())
            .await
            .context("Failed to look up user")?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError("Invalid credentials".to_string())
            })?;

        let valid =
            verify_password(password, &user.password_hash).context("Failed to verify password")?;
        if !valid {
            return Err(UserServiceError::AuthenticationError(
                "Invalid credentials".to_string(),
            ));
        }

        self.create_session(user.id).await
    }

    /// Create a session for an already-authenticated user.
    pub async fn create_session(&self, user_id: i64) -> Result<Session, UserServiceError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::days(self.session_expiration_days),
            created_at: now,
        };

        self.session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(session)
    }

    /// Destroy a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), UserServiceError> {
        self.session_repo
            .delete(token)
            .await
            .context("Failed to delete session")?;
        Ok(())
    }

    /// Validate a session token, returning the associated user.
    ///
    /// Expired sessions are removed and yield `None`.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, UserServiceError> {
        let session = match self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to look up session")?
        {
            Some(session) => session,
            None => return Ok(None),
        };

        if session.is_expired() {
            self.session_repo
                .delete(token)
                .await
                .context("Failed to delete expired session")?;
            return Ok(None);
        }

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to load session user")?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxSessionRepository, SqlxUserRepository};
    use crate::db::{create_test_pool, migrations};

    async fn setup_service() -> UserService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool),
        )
    }

    #[tokio::test]
    async fn test_signup_creates_user() {
        let service = setup_service().await;

        let user = service
            .signup("Автор", "secret-password")
            .await
            .expect("Signup failed");

        assert!(user.id > 0);
        assert_eq!(user.username, "Автор");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_signup_rejects_empty_username() {
        let service = setup_service().await;

        let result = service.signup("   ", "secret").await;
        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_username() {
        let service = setup_service().await;
        service
            .signup("duplicate", "secret")
            .await
            .expect("First signup failed");

        let result = service.signup("duplicate", "other").await;
        assert!(matches!(result, Err(UserServiceError::UserExists(_))));
    }

    #[tokio::test]
    async fn test_login_returns_session() {
        let service = setup_service().await;
        let user = service
            .signup("Автор", "secret-password")
            .await
            .expect("Signup failed");

        let session = service
            .login("Автор", "secret-password")
            .await
            .expect("Login failed");

        assert_eq!(session.user_id, user.id);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = setup_service().await;
        service
            .signup("Автор", "secret-password")
            .await
            .expect("Signup failed");

        let result = service.login("Автор", "wrong").await;
        assert!(matches!(
            result,
            Err(UserServiceError::AuthenticationError(_))
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let service = setup_service().await;

        let result = service.login("nobody", "secret").await;
        assert!(matches!(
            result,
            Err(UserServiceError::AuthenticationError(_))
        ));
    }

    #[tokio::test]
    async fn test_validate_session_roundtrip() {
        let service = setup_service().await;
        let user = service
            .signup("Автор", "secret-password")
            .await
            .expect("Signup failed");
        let session = service
            .create_session(user.id)
            .await
            .expect("Session creation failed");

        let validated = service
            .validate_session(&session.id)
            .await
            .expect("Validation failed")
            .expect("Session should be valid");
        assert_eq!(validated.id, user.id);
    }

    #[tokio::test]
    async fn test_validate_unknown_token() {
        let service = setup_service().await;

        let validated = service
            .validate_session("no-such-token")
            .await
            .expect("Validation failed");
        assert!(validated.is_none());
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let service = setup_service().await;
        let user = service
            .signup("Автор", "secret-password")
            .await
            .expect("Signup failed");
        let session = service
            .create_session(user.id)
            .await
            .expect("Session creation failed");

        service.logout(&session.id).await.expect("Logout failed");

        let validated = service
            .validate_session(&session.id)
            .await
            .expect("Validation failed");
        assert!(validated.is_none());
    }
}
