//! Persistence gateway for reviews and projects.
//!
//! Uses SQLx with SQLite (development and tests) or PostgreSQL (production).
//! Every operation is a single parameterized statement; no transaction spans
//! more than one call.

mod error;
pub mod mocks;
mod pool;
mod schema;

pub mod project_repo;
pub mod review_repo;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options, DbPool, PoolOptions};
pub use schema::run_migrations;

pub use project_repo::{create_project_repository, ProjectRepository};
pub use review_repo::{create_review_repository, ReviewRepository};
