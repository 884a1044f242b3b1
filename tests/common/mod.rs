//! Shared test harness
//!
//! Every test builds a fresh application over an in-memory database; all
//! fixtures go through the factory functions here so no state is shared
//! between scenarios.

#![allow(dead_code)]

use axum::http::{header, HeaderValue};
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use zametki::cache::create_cache;
use zametki::db::repositories::{
    CommentRepository, NewsRepository, NoteRepository, SqlxCommentRepository, SqlxNewsRepository,
    SqlxNoteRepository, SqlxSessionRepository, SqlxUserRepository, UserRepository,
};
use zametki::db::{create_test_pool, migrations};
use zametki::models::{Comment, CreateCommentInput, CreateNewsInput, CreateNoteInput, News, Note, User};
use zametki::services::password::hash_password;
use zametki::services::{CommentService, NewsService, NoteService, UserService};
use zametki::web::{build_router, AppState, TemplateEngine};

/// Default news home page size used by the test apps
pub const HOME_PAGE_SIZE: usize = 10;

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

/// Build a fresh application with the default home page size.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_home_size(HOME_PAGE_SIZE).await
}

/// Build a fresh application over an in-memory database.
pub async fn spawn_app_with_home_size(home_page_size: usize) -> TestApp {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let note_repo = SqlxNoteRepository::boxed(pool.clone());
    let news_repo = SqlxNewsRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    let state = AppState {
        pool: pool.clone(),
        user_service: Arc::new(UserService::new(user_repo, session_repo)),
        note_service: Arc::new(NoteService::new(note_repo)),
        news_service: Arc::new(NewsService::new(
            news_repo,
            comment_repo.clone(),
            create_cache(Duration::from_secs(60)),
            home_page_size,
        )),
        comment_service: Arc::new(CommentService::new(comment_repo)),
        templates: Arc::new(
            TemplateEngine::new(Path::new("templates")).expect("Failed to load templates"),
        ),
    };

    let server = TestServer::new(build_router(state.clone())).expect("Failed to start test server");

    TestApp { server, state }
}

impl TestApp {
    /// Create a user with a fixed test password.
    pub async fn create_user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            hash_password("test-password").expect("Failed to hash password"),
        );
        SqlxUserRepository::new(self.state.pool.clone())
            .create(&user)
            .await
            .expect("Failed to create user")
    }

    /// Open a session for the user, returning the Cookie header value.
    pub async fn login(&self, user: &User) -> HeaderValue {
        let session = self
            .state
            .user_service
            .create_session(user.id)
            .await
            .expect("Failed to create session");
        HeaderValue::from_str(&format!("session={}", session.id))
            .expect("Invalid cookie value")
    }

    /// Create a note owned by the given user.
    pub async fn create_note(&self, author: &User, title: &str, text: &str, slug: &str) -> Note {
        SqlxNoteRepository::new(self.state.pool.clone())
            .create(&CreateNoteInput {
                title: title.to_string(),
                text: text.to_string(),
                slug: slug.to_string(),
                author_id: author.id,
            })
            .await
            .expect("Failed to create note")
    }

    /// Create a news item dated `days_ago` days before today.
    pub async fn create_news(&self, title: &str, days_ago: i64) -> News {
        let date = Utc::now().date_naive() - chrono::Duration::days(days_ago);
        self.create_news_dated(title, date).await
    }

    /// Create a news item with an explicit date.
    pub async fn create_news_dated(&self, title: &str, date: NaiveDate) -> News {
        self.state
            .news_service
            .create(&CreateNewsInput {
                title: title.to_string(),
                text: "Просто текст.".to_string(),
                date,
            })
            .await
            .expect("Failed to create news")
    }

    /// Create a comment by the given user under the given news item.
    pub async fn create_comment(&self, news: &News, author: &User, text: &str) -> Comment {
        SqlxCommentRepository::new(self.state.pool.clone())
            .create(&CreateCommentInput {
                news_id: news.id,
                author_id: author.id,
                text: text.to_string(),
            })
            .await
            .expect("Failed to create comment")
    }

    /// Rewrite a comment's creation timestamp (for ordering scenarios).
    pub async fn set_comment_created(&self, comment_id: i64, created_at: DateTime<Utc>) {
        sqlx::query("UPDATE comments SET created_at = ? WHERE id = ?")
            .bind(created_at)
            .bind(comment_id)
            .execute(&self.state.pool)
            .await
            .expect("Failed to adjust comment timestamp");
    }

    pub async fn note_count(&self) -> i64 {
        SqlxNoteRepository::new(self.state.pool.clone())
            .count()
            .await
            .expect("Failed to count notes")
    }

    pub async fn comment_count(&self) -> i64 {
        SqlxCommentRepository::new(self.state.pool.clone())
            .count()
            .await
            .expect("Failed to count comments")
    }

    pub async fn get_note(&self, id: i64) -> Note {
        SqlxNoteRepository::new(self.state.pool.clone())
            .get_by_id(id)
            .await
            .expect("Failed to load note")
            .expect("Note not found")
    }

    pub async fn get_comment(&self, id: i64) -> Comment {
        SqlxCommentRepository::new(self.state.pool.clone())
            .get_by_id(id)
            .await
            .expect("Failed to load comment")
            .expect("Comment not found")
    }

    pub async fn last_note(&self) -> Note {
        let row: i64 = sqlx::query_scalar("SELECT MAX(id) FROM notes")
            .fetch_one(&self.state.pool)
            .await
            .expect("Failed to find last note");
        self.get_note(row).await
    }

    pub async fn last_comment(&self) -> Comment {
        let row: i64 = sqlx::query_scalar("SELECT MAX(id) FROM comments")
            .fetch_one(&self.state.pool)
            .await
            .expect("Failed to find last comment");
        self.get_comment(row).await
    }
}

/// The Cookie request header name, re-exported for test readability.
pub const COOKIE: header::HeaderName = header::COOKIE;

/// The Location header of a redirect response.
pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Response should carry a Location header")
        .to_str()
        .expect("Location should be valid UTF-8")
        .to_string()
}

/// Assert a 302-class redirect pointing at the given target.
pub fn assert_redirects_to(response: &TestResponse, target: &str) {
    assert!(
        response.status_code().is_redirection(),
        "Expected a redirect, got {}",
        response.status_code()
    );
    assert_eq!(location(response), target);
}
