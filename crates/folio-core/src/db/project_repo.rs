//! Project repository for database operations.
//!
//! Projects are seeded out-of-band; this repository only reads them.

use super::{DbError, DbPool};
use crate::models::Project;
use async_trait::async_trait;

/// Repository trait for project reads.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists all projects with their derived action labels.
    async fn list(&self) -> Result<Vec<Project>, DbError>;
}

/// SQLite implementation of ProjectRepository.
pub struct SqliteProjectRepository {
    pool: sqlx::SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, DbError> {
        let rows: Vec<ProjectRow> =
            sqlx::query_as("SELECT id, title, description, url FROM projects ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }
}

/// PostgreSQL implementation of ProjectRepository.
pub struct PgProjectRepository {
    pool: sqlx::PgPool,
}

impl PgProjectRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, DbError> {
        let rows: Vec<ProjectRow> =
            sqlx::query_as("SELECT id, title, description, url FROM projects ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Project::from).collect())
    }
}

/// Factory function to create the appropriate repository based on pool type.
pub fn create_project_repository(pool: &DbPool) -> Box<dyn ProjectRepository> {
    match pool {
        DbPool::Sqlite(pool) => Box::new(SqliteProjectRepository::new(pool.clone())),
        DbPool::Postgres(pool) => Box::new(PgProjectRepository::new(pool.clone())),
    }
}

// Helper struct for SQLx row mapping

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    title: String,
    description: String,
    url: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project::new(row.id, row.title, row.description, row.url)
    }
}
