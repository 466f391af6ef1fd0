//! Response validator. Scores a free-text answer against a task description.
//!
//! Service failure degrades to an invalid verdict with explanatory feedback,
//! never an error.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::reply::parse_validation_reply;
use crate::domain::ValidationResult;
use crate::ports::TextCompletionPort;

pub struct ValidationService {
    ai: Arc<dyn TextCompletionPort>,
}

impl ValidationService {
    pub fn new(ai: Arc<dyn TextCompletionPort>) -> Self {
        Self { ai }
    }

    /// Judge `user_response` against `task_description`.
    ///
    /// Valid iff the model's reply contains `VALID: Yes`; feedback comes from
    /// the `FEEDBACK:` marker or, failing that, the raw reply.
    pub async fn validate(
        &self,
        task_description: &str,
        user_response: &str,
    ) -> ValidationResult {
        let prompt = validation_prompt(task_description, user_response);

        match self.ai.complete(&prompt).await {
            Ok(reply) => {
                let result = parse_validation_reply(&reply);
                info!(is_valid = result.is_valid, "response validated");
                result
            }
            Err(e) => {
                warn!(error = %e, "response validation failed");
                ValidationResult {
                    is_valid: false,
                    feedback: format!("Error validating response: {e}"),
                }
            }
        }
    }
}

fn validation_prompt(task_description: &str, user_response: &str) -> String {
    format!(
        "Validate the learning response:\n\
         Task: {task_description}\n\
         User's Response: {user_response}\n\
         \n\
         Evaluation Criteria:\n\
         1. Direct relevance to the specific task\n\
         2. Understanding of the specific concept\n\
         3. Evidence of completing the practice activity\n\
         4. Conciseness and clarity\n\
         \n\
         Return EXACTLY in this format:\n\
         VALID: [Yes/No]\n\
         FEEDBACK: [Brief, specific feedback focused only on the task at hand, with 1-2 improvement suggestions if needed]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionAdapter;

    fn service(mock: MockCompletionAdapter) -> ValidationService {
        ValidationService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn valid_verdict_with_feedback() {
        let svc = service(MockCompletionAdapter::replying(
            "VALID: Yes\nFEEDBACK: Great job",
        ));
        let result = svc.validate("Day 1: Basic syntax", "I printed hello world").await;

        assert!(result.is_valid);
        assert_eq!(result.feedback, "Great job");
    }

    #[tokio::test]
    async fn invalid_verdict_with_feedback() {
        let svc = service(MockCompletionAdapter::replying(
            "VALID: No\nFEEDBACK: Missing detail",
        ));
        let result = svc.validate("Day 1: Basic syntax", "I did stuff").await;

        assert!(!result.is_valid);
        assert_eq!(result.feedback, "Missing detail");
    }

    #[tokio::test]
    async fn missing_feedback_marker_uses_raw_reply() {
        let raw = "I could not evaluate this response.";
        let svc = service(MockCompletionAdapter::replying(raw));
        let result = svc.validate("Day 1", "answer").await;

        assert!(!result.is_valid);
        assert_eq!(result.feedback, raw);
    }

    #[tokio::test]
    async fn service_failure_degrades_to_invalid_with_message() {
        let svc = service(MockCompletionAdapter::failing("connection refused"));
        let result = svc.validate("Day 1", "answer").await;

        assert!(!result.is_valid);
        assert!(result.feedback.starts_with("Error validating response:"));
        assert!(result.feedback.contains("connection refused"));
    }

    #[test]
    fn prompt_embeds_task_and_response() {
        let prompt = validation_prompt("Day 3: Control flow", "I wrote a prime checker");
        assert!(prompt.contains("Task: Day 3: Control flow"));
        assert!(prompt.contains("User's Response: I wrote a prime checker"));
        assert!(prompt.contains("VALID: [Yes/No]"));
    }
}
