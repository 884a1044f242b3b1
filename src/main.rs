//! Zametki - personal notes manager and news board

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zametki::{
    cache::create_cache,
    config::Config,
    db::{
        self,
        repositories::{
            SqlxCommentRepository, SqlxNewsRepository, SqlxNoteRepository, SqlxSessionRepository,
            SqlxUserRepository,
        },
    },
    services::{CommentService, NewsService, NoteService, UserService},
    web::{self, AppState, TemplateEngine},
};

/// TTL for the cached news home listing
const NEWS_CACHE_TTL_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zametki=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Zametki...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Initialize cache
    let cache = create_cache(Duration::from_secs(NEWS_CACHE_TTL_SECS));

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let session_repo = SqlxSessionRepository::boxed(pool.clone());
    let note_repo = SqlxNoteRepository::boxed(pool.clone());
    let news_repo = SqlxNewsRepository::boxed(pool.clone());
    let comment_repo = SqlxCommentRepository::boxed(pool.clone());

    // Initialize services
    let user_service = Arc::new(UserService::new(user_repo, session_repo));
    let note_service = Arc::new(NoteService::new(note_repo));
    let news_service = Arc::new(NewsService::new(
        news_repo,
        comment_repo.clone(),
        cache,
        config.app.news_count_on_home_page,
    ));
    let comment_service = Arc::new(CommentService::new(comment_repo));

    // Initialize template engine
    let templates = Arc::new(TemplateEngine::new(&config.templates.path)?);
    tracing::info!("Templates loaded from {:?}", config.templates.path);

    // Build application state
    let state = AppState {
        pool,
        user_service,
        note_service,
        news_service,
        comment_service,
        templates,
    };

    // Build router
    let app = web::build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
