//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use chrono::NaiveDate;

use crate::domain::{DomainError, Goal, NewGoal, ScheduleEntry, Task};

/// Text-completion service boundary. One operation: prompt in, reply out.
///
/// Fails with `DomainError::Completion` when the credential is missing or
/// invalid, the network call fails, or the service rejects the prompt.
/// The wire protocol is the adapter's business.
#[async_trait::async_trait]
pub trait TextCompletionPort: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Repository port. Persist goals and their tasks.
///
/// Deleting a goal deletes all its tasks first.
#[async_trait::async_trait]
pub trait GoalRepoPort: Send + Sync {
    /// Insert a goal and return it with its assigned id.
    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, DomainError>;

    async fn get_goal(&self, goal_id: i64) -> Result<Option<Goal>, DomainError>;

    async fn list_goals(&self) -> Result<Vec<Goal>, DomainError>;

    /// Delete a goal and all its tasks (cascade, single transaction).
    async fn delete_goal(&self, goal_id: i64) -> Result<(), DomainError>;

    /// Batch-insert schedule entries as incomplete tasks for a goal.
    async fn insert_tasks(
        &self,
        goal_id: i64,
        entries: &[ScheduleEntry],
    ) -> Result<(), DomainError>;

    async fn get_task(&self, task_id: i64) -> Result<Option<Task>, DomainError>;

    /// Tasks for a goal, ordered by date ascending.
    async fn tasks_for_goal(&self, goal_id: i64) -> Result<Vec<Task>, DomainError>;

    /// All tasks across goals, ordered by date ascending.
    async fn list_all_tasks(&self) -> Result<Vec<Task>, DomainError>;

    /// Tasks on a specific date, across goals.
    async fn tasks_on_date(&self, date: NaiveDate) -> Result<Vec<Task>, DomainError>;

    async fn update_task_description(
        &self,
        task_id: i64,
        description: &str,
    ) -> Result<(), DomainError>;

    async fn set_task_completed(&self, task_id: i64, completed: bool) -> Result<(), DomainError>;
}
