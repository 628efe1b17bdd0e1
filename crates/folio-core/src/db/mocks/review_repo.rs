//! Mock implementation of ReviewRepository for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::{DbError, ReviewRepository};
use crate::models::{NewReview, Review};

/// Mock implementation of ReviewRepository using in-memory storage.
#[derive(Default)]
pub struct MockReviewRepository {
    reviews: Arc<RwLock<Vec<Review>>>,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    fail: AtomicBool,
}

impl MockReviewRepository {
    /// Creates a new mock repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock repository pre-populated with reviews.
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Arc::new(RwLock::new(reviews)),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with a query error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Gets a snapshot of all stored reviews.
    pub async fn snapshot(&self) -> Vec<Review> {
        self.reviews.read().await.clone()
    }

    /// Number of `list` calls made so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of `insert` calls made so far.
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Total number of calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.insert_calls()
    }

    fn check_failure(&self) -> Result<(), DbError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DbError::Query("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MockReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, DbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.reviews.read().await.clone())
    }

    async fn insert(&self, review: &NewReview) -> Result<(), DbError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut reviews = self.reviews.write().await;
        let id = reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        reviews.push(Review {
            id,
            company: review.company.clone(),
            name: review.name.clone(),
            review: review.review.clone(),
        });
        Ok(())
    }
}
