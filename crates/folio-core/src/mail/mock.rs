//! In-memory mailer for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{MailError, Mailer, OutboundEmail};

/// Records every message instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct MockMailer {
    sent: Arc<RwLock<Vec<OutboundEmail>>>,
    fail: Arc<AtomicBool>,
}

impl MockMailer {
    /// Creates a new mock mailer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock mailer whose sends always fail.
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.set_failing(true);
        mailer
    }

    /// Makes every subsequent send fail with a transport error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Messages accepted so far.
    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.read().await.clone()
    }

    /// Number of messages accepted so far.
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Transport("mock relay unreachable".to_string()));
        }
        self.sent.write().await.push(email.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
