//! Mock implementation of ProjectRepository for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::db::{DbError, ProjectRepository};
use crate::models::Project;

/// Mock implementation of ProjectRepository using in-memory storage.
#[derive(Default)]
pub struct MockProjectRepository {
    projects: Vec<Project>,
    list_calls: AtomicUsize,
    fail: AtomicBool,
}

impl MockProjectRepository {
    /// Creates an empty mock repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock repository from `(title, url)` pairs; ids start at 1.
    pub fn with_urls(entries: &[(&str, &str)]) -> Self {
        let projects = entries
            .iter()
            .enumerate()
            .map(|(i, (title, url))| {
                Project::new(
                    i as i64 + 1,
                    title.to_string(),
                    format!("{} description", title),
                    url.to_string(),
                )
            })
            .collect();

        Self {
            projects,
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with a query error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `list` calls made so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectRepository for MockProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, DbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DbError::Query("mock failure".to_string()));
        }
        Ok(self.projects.clone())
    }
}
