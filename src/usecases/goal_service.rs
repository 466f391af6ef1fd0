//! Goal orchestration. Coordinates repository, schedule generator, and validator.
//!
//! This is the caller side of the generator/validator contracts: it persists
//! generated entries as tasks and marks a task completed when its response
//! validates.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::domain::stats::goal_stats;
use crate::domain::{DomainError, Goal, GoalStats, NewGoal, Task, ValidationResult};
use crate::ports::GoalRepoPort;
use crate::usecases::{ScheduleService, ValidationService};

/// Outcome of creating a goal: the persisted goal plus how many tasks the
/// generator produced (zero means the schedule could not be generated).
#[derive(Debug, Clone)]
pub struct CreatedGoal {
    pub goal: Goal,
    pub tasks_generated: usize,
}

pub struct GoalService {
    repo: Arc<dyn GoalRepoPort>,
    schedule: Arc<ScheduleService>,
    validator: Arc<ValidationService>,
}

impl GoalService {
    pub fn new(
        repo: Arc<dyn GoalRepoPort>,
        schedule: Arc<ScheduleService>,
        validator: Arc<ValidationService>,
    ) -> Self {
        Self {
            repo,
            schedule,
            validator,
        }
    }

    /// Persist a goal and generate its task schedule.
    ///
    /// An empty schedule is reported via `tasks_generated == 0`, not an error:
    /// the goal itself is still created.
    pub async fn create_goal(&self, new_goal: NewGoal) -> Result<CreatedGoal, DomainError> {
        if new_goal.title.trim().is_empty() {
            return Err(DomainError::Input("goal title must not be empty".into()));
        }
        if new_goal.start_date > new_goal.end_date {
            return Err(DomainError::Input(format!(
                "start date {} is after end date {}",
                new_goal.start_date, new_goal.end_date
            )));
        }

        let goal = self.repo.create_goal(&new_goal).await?;
        info!(goal_id = goal.id, title = %goal.title, "goal created");

        let entries = self
            .schedule
            .generate(
                &goal.title,
                &goal.description,
                goal.start_date,
                goal.end_date,
            )
            .await;

        if entries.is_empty() {
            warn!(goal_id = goal.id, "no tasks generated for goal");
        } else {
            self.repo.insert_tasks(goal.id, &entries).await?;
            info!(goal_id = goal.id, tasks = entries.len(), "schedule persisted");
        }

        Ok(CreatedGoal {
            tasks_generated: entries.len(),
            goal,
        })
    }

    /// Delete a goal and all its tasks.
    pub async fn delete_goal(&self, goal_id: i64) -> Result<(), DomainError> {
        self.repo.delete_goal(goal_id).await?;
        info!(goal_id, "goal deleted");
        Ok(())
    }

    /// Validate a user's response to a task; a valid response marks the task
    /// completed.
    pub async fn submit_response(
        &self,
        task_id: i64,
        user_response: &str,
    ) -> Result<ValidationResult, DomainError> {
        if user_response.trim().is_empty() {
            return Err(DomainError::Input("no response provided".into()));
        }
        let task = self
            .repo
            .get_task(task_id)
            .await?
            .ok_or_else(|| DomainError::Input(format!("task {task_id} not found")))?;

        let result = self.validator.validate(&task.description, user_response).await;

        if result.is_valid {
            self.repo.set_task_completed(task_id, true).await?;
            info!(task_id, "task marked completed");
        }

        Ok(result)
    }

    pub async fn update_task_description(
        &self,
        task_id: i64,
        description: &str,
    ) -> Result<(), DomainError> {
        self.repo
            .get_task(task_id)
            .await?
            .ok_or_else(|| DomainError::Input(format!("task {task_id} not found")))?;
        self.repo.update_task_description(task_id, description).await
    }

    pub async fn list_goals(&self) -> Result<Vec<Goal>, DomainError> {
        self.repo.list_goals().await
    }

    pub async fn tasks_for_goal(&self, goal_id: i64) -> Result<Vec<Task>, DomainError> {
        self.repo.tasks_for_goal(goal_id).await
    }

    pub async fn tasks_on_date(&self, date: NaiveDate) -> Result<Vec<Task>, DomainError> {
        self.repo.tasks_on_date(date).await
    }

    /// Dashboard stats over all tasks, as of the local calendar date.
    pub async fn stats(&self) -> Result<GoalStats, DomainError> {
        let tasks = self.repo.list_all_tasks().await?;
        Ok(goal_stats(&tasks, Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionAdapter;
    use crate::adapters::persistence::SqliteRepo;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn new_goal() -> NewGoal {
        NewGoal {
            title: "Learn Python".into(),
            description: "from zero to scripts".into(),
            start_date: date("2024-03-01"),
            end_date: date("2024-03-03"),
        }
    }

    async fn service_with(
        dir: &tempfile::TempDir,
        generator_mock: MockCompletionAdapter,
        validator_mock: MockCompletionAdapter,
    ) -> GoalService {
        let repo = Arc::new(SqliteRepo::connect(dir.path()).await.unwrap());
        GoalService::new(
            repo,
            Arc::new(ScheduleService::new(Arc::new(generator_mock))),
            Arc::new(ValidationService::new(Arc::new(validator_mock))),
        )
    }

    #[tokio::test]
    async fn create_goal_persists_generated_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let reply = "DATE: 2024-03-01 | TASK: Day 1\n\
                     DATE: 2024-03-02 | TASK: Day 2\n\
                     DATE: 2024-03-03 | TASK: Day 3";
        let svc = service_with(
            &dir,
            MockCompletionAdapter::replying(reply),
            MockCompletionAdapter::new(),
        )
        .await;

        let created = svc.create_goal(new_goal()).await.unwrap();
        assert_eq!(created.tasks_generated, 3);

        let tasks = svc.tasks_for_goal(created.goal.id).await.unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| !t.completed));
        assert_eq!(tasks[0].date, date("2024-03-01"));
    }

    #[tokio::test]
    async fn create_goal_with_failing_service_still_creates_goal() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(
            &dir,
            MockCompletionAdapter::failing("down"),
            MockCompletionAdapter::new(),
        )
        .await;

        let created = svc.create_goal(new_goal()).await.unwrap();
        assert_eq!(created.tasks_generated, 0);
        assert_eq!(svc.list_goals().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_goal_rejects_inverted_range() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(
            &dir,
            MockCompletionAdapter::new(),
            MockCompletionAdapter::new(),
        )
        .await;

        let mut goal = new_goal();
        goal.start_date = date("2024-04-01");
        let err = svc.create_goal(goal).await.unwrap_err();
        assert!(matches!(err, DomainError::Input(_)));
    }

    #[tokio::test]
    async fn valid_response_marks_task_completed() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(
            &dir,
            MockCompletionAdapter::replying("DATE: 2024-03-01 | TASK: Day 1"),
            MockCompletionAdapter::replying("VALID: Yes\nFEEDBACK: Great job"),
        )
        .await;

        let created = svc.create_goal(new_goal()).await.unwrap();
        let tasks = svc.tasks_for_goal(created.goal.id).await.unwrap();

        let result = svc.submit_response(tasks[0].id, "my answer").await.unwrap();
        assert!(result.is_valid);

        let tasks = svc.tasks_for_goal(created.goal.id).await.unwrap();
        assert!(tasks[0].completed);
    }

    #[tokio::test]
    async fn invalid_response_leaves_task_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(
            &dir,
            MockCompletionAdapter::replying("DATE: 2024-03-01 | TASK: Day 1"),
            MockCompletionAdapter::replying("VALID: No\nFEEDBACK: Missing detail"),
        )
        .await;

        let created = svc.create_goal(new_goal()).await.unwrap();
        let tasks = svc.tasks_for_goal(created.goal.id).await.unwrap();

        let result = svc.submit_response(tasks[0].id, "my answer").await.unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.feedback, "Missing detail");

        let tasks = svc.tasks_for_goal(created.goal.id).await.unwrap();
        assert!(!tasks[0].completed);
    }

    #[tokio::test]
    async fn empty_response_rejected_before_service_call() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(
            &dir,
            MockCompletionAdapter::new(),
            MockCompletionAdapter::new(),
        )
        .await;

        let err = svc.submit_response(1, "   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Input(_)));
    }

    #[tokio::test]
    async fn delete_goal_cascades_to_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service_with(
            &dir,
            MockCompletionAdapter::replying("DATE: 2024-03-01 | TASK: Day 1"),
            MockCompletionAdapter::new(),
        )
        .await;

        let created = svc.create_goal(new_goal()).await.unwrap();
        svc.delete_goal(created.goal.id).await.unwrap();

        assert!(svc.list_goals().await.unwrap().is_empty());
        assert!(svc.tasks_for_goal(created.goal.id).await.unwrap().is_empty());
    }
}
