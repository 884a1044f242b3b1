//! News repository
//!
//! News items have no public write surface; creation happens through this
//! repository only (seeding, fixtures, back office tooling).

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::models::{CreateNewsInput, News};

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a news item
    async fn create(&self, input: &CreateNewsInput) -> Result<News>;

    /// Get a news item by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// Latest news, date descending, at most `limit` items
    async fn latest(&self, limit: i64) -> Result<Vec<News>>;

    /// Count all news items
    async fn count(&self) -> Result<i64>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: SqlitePool,
}

impl SqlxNewsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, input: &CreateNewsInput) -> Result<News> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO news (title, text, date, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.title)
        .bind(&input.text)
        .bind(input.date)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create news item")?;

        Ok(News {
            id: result.last_insert_rowid(),
            title: input.title.clone(),
            text: input.text.clone(),
            date: input.date,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        let row = sqlx::query("SELECT id, title, text, date, created_at FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to get news by ID")?;

        Ok(row.map(|r| row_to_news(&r)))
    }

    async fn latest(&self, limit: i64) -> Result<Vec<News>> {
        let rows = sqlx::query(
            "SELECT id, title, text, date, created_at FROM news \
             ORDER BY date DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list latest news")?;

        Ok(rows.iter().map(row_to_news).collect())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count news")?;

        Ok(count)
    }
}

fn row_to_news(row: &sqlx::sqlite::SqliteRow) -> News {
    News {
        id: row.get("id"),
        title: row.get("title"),
        text: row.get("text"),
        date: row.get("date"),
        created_at: row.get("created_at"),
    }
}
