//! Mock implementations of repository traits for testing.
//!
//! These mocks use in-memory storage and do not require a database connection.
//! They count every call so tests can assert that a code path never touched
//! persistence, and can be switched into a failing mode to exercise error paths.

mod project_repo;
mod review_repo;

pub use project_repo::MockProjectRepository;
pub use review_repo::MockReviewRepository;
