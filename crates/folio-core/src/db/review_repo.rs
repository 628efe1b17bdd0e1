//! Review repository for database operations.

use super::{DbError, DbPool};
use crate::models::{NewReview, Review};
use async_trait::async_trait;

/// Repository trait for review persistence.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Lists all reviews in insertion order.
    async fn list(&self) -> Result<Vec<Review>, DbError>;

    /// Inserts a review. The identifier is assigned by the store.
    async fn insert(&self, review: &NewReview) -> Result<(), DbError>;
}

/// SQLite implementation of ReviewRepository.
pub struct SqliteReviewRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, DbError> {
        let reviews: Vec<Review> =
            sqlx::query_as("SELECT id, company, name, review FROM reviews ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(reviews)
    }

    async fn insert(&self, review: &NewReview) -> Result<(), DbError> {
        sqlx::query("INSERT INTO reviews (company, name, review) VALUES (?, ?, ?)")
            .bind(&review.company)
            .bind(&review.name)
            .bind(&review.review)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// PostgreSQL implementation of ReviewRepository.
pub struct PgReviewRepository {
    pool: sqlx::PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, DbError> {
        let reviews: Vec<Review> =
            sqlx::query_as("SELECT id, company, name, review FROM reviews ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(reviews)
    }

    async fn insert(&self, review: &NewReview) -> Result<(), DbError> {
        sqlx::query("INSERT INTO reviews (company, name, review) VALUES ($1, $2, $3)")
            .bind(&review.company)
            .bind(&review.name)
            .bind(&review.review)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Factory function to create the appropriate repository based on pool type.
pub fn create_review_repository(pool: &DbPool) -> Box<dyn ReviewRepository> {
    match pool {
        DbPool::Sqlite(pool) => Box::new(SqliteReviewRepository::new(pool.clone())),
        DbPool::Postgres(pool) => Box::new(PgReviewRepository::new(pool.clone())),
    }
}
