//! Schedule generator. Prompt construction, reply parsing, deterministic fallback.
//!
//! Failures never escape: a failed service call yields an empty schedule,
//! an unparseable reply triggers the local curriculum-based fallback.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::curriculum::fallback_schedule;
use crate::domain::reply::parse_schedule_reply;
use crate::domain::ScheduleEntry;
use crate::ports::TextCompletionPort;

/// Service generating dated learning tasks for a goal.
pub struct ScheduleService {
    ai: Arc<dyn TextCompletionPort>,
}

impl ScheduleService {
    pub fn new(ai: Arc<dyn TextCompletionPort>) -> Self {
        Self { ai }
    }

    /// Generate one task per day over `[start, end]`, sorted ascending by date.
    ///
    /// Returns an empty vec when `start > end` or the completion service
    /// fails. A reply that parses to zero entries falls back to the
    /// deterministic local generator.
    pub async fn generate(
        &self,
        goal_title: &str,
        goal_description: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<ScheduleEntry> {
        if start > end {
            warn!(%start, %end, "refusing to generate schedule for inverted date range");
            return Vec::new();
        }

        let prompt = schedule_prompt(goal_title, goal_description, start, end);
        info!(goal_title, %start, %end, "generating schedule");

        let mut entries = match self.ai.complete(&prompt).await {
            Ok(reply) => parse_schedule_reply(&reply, start, end),
            Err(e) => {
                warn!(goal_title, error = %e, "schedule generation failed");
                return Vec::new();
            }
        };

        if entries.is_empty() {
            info!(goal_title, "reply had no parseable schedule lines, using fallback generator");
            entries = fallback_schedule(goal_title, start, end);
        }

        // Stable: duplicate dates from the reply keep their original order.
        entries.sort_by_key(|e| e.date);

        info!(goal_title, tasks = entries.len(), "schedule generated");
        entries
    }
}

/// One line per day, exact `DATE: YYYY-MM-DD | TASK: ...` format.
fn schedule_prompt(
    goal_title: &str,
    goal_description: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> String {
    let days_between = (end - start).num_days() + 1;
    let start_date = start.format("%Y-%m-%d");
    let end_date = end.format("%Y-%m-%d");

    format!(
        "Create a focused {days_between}-day learning schedule specifically for learning: {goal_title}\n\
         Description: {goal_description}\n\
         Start Date: {start_date}\n\
         End Date: {end_date}\n\
         \n\
         For each day, provide ONLY relevant tasks directly related to {goal_title}.\n\
         \n\
         Each daily task should include:\n\
         1. A specific, concise learning objective for the day\n\
         2. ONE key concept to learn\n\
         3. ONE practical coding exercise that builds real-world skills\n\
         \n\
         Format each task EXACTLY as:\n\
         DATE: YYYY-MM-DD | TASK: Day [X]: [Specific topic] - Objective: [Clear learning goal] - Task: [Key concept] - Practice: [Coding exercise with specific instructions]\n\
         \n\
         Rules:\n\
         1. Keep tasks strictly focused on {goal_title} without adding unrelated content\n\
         2. Tasks should have concrete, achievable coding objectives\n\
         3. Ensure a logical progression from fundamentals to advanced topics\n\
         4. Make exercises practical and applicable to real-world scenarios\n\
         5. For Python specifically, include best practices and idiomatic approaches\n\
         6. Provide specific, actionable instructions rather than vague suggestions\n\
         7. Tasks should build upon previous learning\n\
         8. Advanced topics should include specific libraries, techniques, or applications"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionAdapter;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service(mock: MockCompletionAdapter) -> ScheduleService {
        ScheduleService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn parses_model_schedule() {
        let reply = "DATE: 2024-03-02 | TASK: Day 2: Variables\n\
                     DATE: 2024-03-01 | TASK: Day 1: Basic syntax";
        let svc = service(MockCompletionAdapter::replying(reply));

        let entries = svc
            .generate("Learn Python", "from zero", date("2024-03-01"), date("2024-03-02"))
            .await;

        assert_eq!(entries.len(), 2);
        // Sorted ascending even though the reply was out of order.
        assert_eq!(entries[0].date, date("2024-03-01"));
        assert_eq!(entries[1].date, date("2024-03-02"));
    }

    #[tokio::test]
    async fn service_failure_yields_empty_schedule() {
        let svc = service(MockCompletionAdapter::failing("quota exceeded"));

        let entries = svc
            .generate("Learn Python", "", date("2024-03-01"), date("2024-03-03"))
            .await;

        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn unparseable_reply_falls_back_to_curriculum() {
        let svc = service(MockCompletionAdapter::replying(
            "Sorry, I cannot produce a schedule today.",
        ));

        let entries = svc
            .generate("Learn Python", "", date("2024-03-01"), date("2024-03-03"))
            .await;

        assert_eq!(entries.len(), 3);
        assert!(entries[0].description.starts_with("Day 1: Basic syntax"));
        assert_eq!(entries[0].date, date("2024-03-01"));
        assert_eq!(entries[2].date, date("2024-03-03"));
    }

    #[tokio::test]
    async fn out_of_range_lines_excluded_in_range_kept() {
        let reply = "DATE: 2024-02-01 | TASK: too early\n\
                     DATE: 2024-03-02 | TASK: kept\n\
                     DATE: 2024-05-01 | TASK: too late";
        let svc = service(MockCompletionAdapter::replying(reply));

        let entries = svc
            .generate("Learn Python", "", date("2024-03-01"), date("2024-03-03"))
            .await;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description, "kept");
    }

    #[tokio::test]
    async fn only_out_of_range_lines_triggers_fallback() {
        // Parsed lines exist but all are discarded, so the schedule is empty
        // and the deterministic generator takes over.
        let reply = "DATE: 2020-01-01 | TASK: stale";
        let svc = service(MockCompletionAdapter::replying(reply));

        let entries = svc
            .generate("Learn Python", "", date("2024-03-01"), date("2024-03-02"))
            .await;

        assert_eq!(entries.len(), 2);
        assert!(entries[0].description.contains("Basic syntax"));
    }

    #[tokio::test]
    async fn duplicate_dates_kept_in_reply_order() {
        let reply = "DATE: 2024-03-01 | TASK: morning\n\
                     DATE: 2024-03-01 | TASK: evening";
        let svc = service(MockCompletionAdapter::replying(reply));

        let entries = svc
            .generate("Learn Python", "", date("2024-03-01"), date("2024-03-02"))
            .await;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "morning");
        assert_eq!(entries[1].description, "evening");
    }

    #[tokio::test]
    async fn inverted_range_returns_empty_without_service_call() {
        let svc = service(MockCompletionAdapter::failing("should never be called"));

        let entries = svc
            .generate("Learn Python", "", date("2024-03-05"), date("2024-03-01"))
            .await;

        assert!(entries.is_empty());
    }

    #[test]
    fn prompt_contains_day_count_and_format() {
        let prompt = schedule_prompt(
            "Learn Python",
            "from zero",
            date("2024-03-01"),
            date("2024-03-07"),
        );
        assert!(prompt.contains("7-day learning schedule"));
        assert!(prompt.contains("DATE: YYYY-MM-DD | TASK:"));
        assert!(prompt.contains("Start Date: 2024-03-01"));
        assert!(prompt.contains("End Date: 2024-03-07"));
    }
}
