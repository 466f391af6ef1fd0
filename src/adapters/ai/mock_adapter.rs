//! Mock completion adapter for testing and offline use.
//!
//! Pops scripted replies in FIFO order; unscripted calls behave as a service
//! failure, which downstream services degrade from (empty schedule via the
//! deterministic fallback, invalid verdict, failed chat turn).

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tracing::info;

use crate::domain::DomainError;
use crate::ports::TextCompletionPort;

pub struct MockCompletionAdapter {
    replies: Mutex<VecDeque<Result<String, String>>>,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockCompletionAdapter {
    /// Unscripted mock: every call fails like an unconfigured service.
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    /// Mock that returns `reply` once, then behaves as unscripted.
    pub fn replying(reply: &str) -> Self {
        Self::with_replies(vec![Ok(reply.to_string())])
    }

    /// Mock whose next call fails with `detail`.
    pub fn failing(detail: &str) -> Self {
        Self::with_replies(vec![Err(detail.to_string())])
    }

    pub fn with_replies(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for MockCompletionAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextCompletionPort for MockCompletionAdapter {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        info!(prompt_len = prompt.len(), "[MOCK] simulating completion");

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let next = self
            .replies
            .lock()
            .expect("mock replies lock")
            .pop_front();

        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(detail)) => Err(DomainError::Completion(detail)),
            None => Err(DomainError::Completion(
                "no completion service configured".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_popped_in_order() {
        let mock = MockCompletionAdapter::with_replies(vec![
            Ok("first".into()),
            Ok("second".into()),
        ]);

        assert_eq!(mock.complete("a").await.unwrap(), "first");
        assert_eq!(mock.complete("b").await.unwrap(), "second");
        assert!(mock.complete("c").await.is_err());
    }

    #[tokio::test]
    async fn scripted_failure_surfaces_detail() {
        let mock = MockCompletionAdapter::failing("quota exceeded");
        let err = mock.complete("a").await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn unscripted_mock_always_fails() {
        let mock = MockCompletionAdapter::new();
        assert!(mock.complete("a").await.is_err());
        assert!(mock.complete("b").await.is_err());
    }
}
