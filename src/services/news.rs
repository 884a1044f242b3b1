//! News service
//!
//! Read-side logic for the news board: the home-page listing (bounded,
//! date descending, cached) and the detail view with its comment thread.

use crate::cache::{CacheLayer, MemoryCache};
use crate::db::repositories::{CommentRepository, NewsRepository};
use crate::models::{CreateNewsInput, News, NewsWithComments};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Cache key for the home-page listing
const CACHE_KEY_NEWS_HOME: &str = "news:home";

/// News service
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    cache: Arc<MemoryCache>,
    home_page_size: usize,
}

impl NewsService {
    pub fn new(
        repo: Arc<dyn NewsRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        cache: Arc<MemoryCache>,
        home_page_size: usize,
    ) -> Self {
        Self {
            repo,
            comment_repo,
            cache,
            home_page_size,
        }
    }

    /// Number of items shown on the home page
    pub fn home_page_size(&self) -> usize {
        self.home_page_size
    }

    /// Create a news item (no public route; seeding and back office only).
    pub async fn create(&self, input: &CreateNewsInput) -> Result<News> {
        let news = self
            .repo
            .create(input)
            .await
            .context("Failed to create news")?;

        self.cache
            .delete(CACHE_KEY_NEWS_HOME)
            .await
            .context("Failed to invalidate news cache")?;

        Ok(news)
    }

    /// The home-page listing: at most `home_page_size` items, strictly
    /// descending by date.
    pub async fn home_page(&self) -> Result<Vec<News>> {
        if let Some(cached) = self
            .cache
            .get::<Vec<News>>(CACHE_KEY_NEWS_HOME)
            .await
            .ok()
            .flatten()
        {
            return Ok(cached);
        }

        let news = self
            .repo
            .latest(self.home_page_size as i64)
            .await
            .context("Failed to load home page news")?;

        if let Err(e) = self.cache.set(CACHE_KEY_NEWS_HOME, &news).await {
            tracing::warn!("Failed to cache home page news: {}", e);
        }

        Ok(news)
    }

    /// A news item by ID, or None if it does not exist.
    pub async fn get(&self, id: i64) -> Result<Option<News>> {
        self.repo.get_by_id(id).await.context("Failed to load news")
    }

    /// A news item with its full comment thread (ascending), or None.
    pub async fn get_with_comments(&self, id: i64) -> Result<Option<NewsWithComments>> {
        let news = match self.get(id).await? {
            Some(news) => news,
            None => return Ok(None),
        };

        let comments = self
            .comment_repo
            .list_by_news(news.id)
            .await
            .context("Failed to load comments")?;

        Ok(Some(NewsWithComments { news, comments }))
    }
}
