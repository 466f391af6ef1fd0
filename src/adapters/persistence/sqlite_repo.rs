//! SQLite-backed repository via libsql. Implements GoalRepoPort.
//!
//! One database file (goals.db) in the given base directory. Dates are stored
//! as ISO-8601 TEXT so range and equality filters sort lexicographically.
//! Goal deletion cascades to tasks inside a single transaction.

use chrono::NaiveDate;
use libsql::{params, Database};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::{DomainError, Goal, NewGoal, ScheduleEntry, Task};
use crate::ports::GoalRepoPort;

const GOALS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS goals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL
)"#;

const TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    goal_id INTEGER NOT NULL,
    date TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    completed INTEGER NOT NULL DEFAULT 0
)"#;

const TASKS_GOAL_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_goal ON tasks (goal_id, date)";
const TASKS_DATE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_tasks_date ON tasks (date)";

const DATE_FMT: &str = "%Y-%m-%d";

/// SQLite repository. One database file (goals.db) in the base directory.
pub struct SqliteRepo {
    db: Database,
    db_path: PathBuf,
}

impl SqliteRepo {
    /// Connect to (or create) the database and ensure the schema exists.
    /// Call once at startup; the returned repo is safe to share via Arc.
    ///
    /// WAL mode and synchronous=NORMAL: concurrent readers plus one writer
    /// without sacrificing durability.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Repo(e.to_string()))?;
        let db_path = base.join("goals.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Repo(e.to_string()))?;

        // PRAGMA returns a row (new value); use query and consume rows
        // (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .is_some()
        {}
        let mut sync_rows = conn
            .query("PRAGMA synchronous=NORMAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("synchronous pragma failed: {}", e)))?;
        while sync_rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
            .is_some()
        {}

        conn.execute(GOALS_TABLE, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        conn.execute(TASKS_TABLE, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        conn.execute(TASKS_GOAL_INDEX, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        conn.execute(TASKS_DATE_INDEX, ())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<libsql::Connection, DomainError> {
        self.db.connect().map_err(|e| DomainError::Repo(e.to_string()))
    }

    fn date_to_text(date: NaiveDate) -> String {
        date.format(DATE_FMT).to_string()
    }

    fn text_to_date(s: &str) -> Result<NaiveDate, DomainError> {
        NaiveDate::parse_from_str(s, DATE_FMT)
            .map_err(|e| DomainError::Repo(format!("bad date column '{}': {}", s, e)))
    }

    fn goal_from_row(row: &libsql::Row) -> Result<Goal, DomainError> {
        let id: i64 = row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?;
        let title: String = row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?;
        let description: String = row.get::<String>(2).unwrap_or_default();
        let start: String = row.get(3).map_err(|e| DomainError::Repo(e.to_string()))?;
        let end: String = row.get(4).map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(Goal {
            id,
            title,
            description,
            start_date: Self::text_to_date(&start)?,
            end_date: Self::text_to_date(&end)?,
        })
    }

    fn task_from_row(row: &libsql::Row) -> Result<Task, DomainError> {
        let id: i64 = row.get(0).map_err(|e| DomainError::Repo(e.to_string()))?;
        let goal_id: i64 = row.get(1).map_err(|e| DomainError::Repo(e.to_string()))?;
        let date: String = row.get(2).map_err(|e| DomainError::Repo(e.to_string()))?;
        let description: String = row.get::<String>(3).unwrap_or_default();
        let completed: i64 = row.get(4).map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(Task {
            id,
            goal_id,
            date: Self::text_to_date(&date)?,
            description,
            completed: completed != 0,
        })
    }

    async fn query_tasks(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Task>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            tasks.push(Self::task_from_row(&row)?);
        }
        Ok(tasks)
    }
}

#[async_trait::async_trait]
impl GoalRepoPort for SqliteRepo {
    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, DomainError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO goals (title, description, start_date, end_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                goal.title.as_str(),
                goal.description.as_str(),
                Self::date_to_text(goal.start_date),
                Self::date_to_text(goal.end_date)
            ],
        )
        .await
        .map_err(|e| DomainError::Repo(e.to_string()))?;

        let id = conn.last_insert_rowid();
        info!(goal_id = id, title = %goal.title, "goal persisted");

        Ok(Goal {
            id,
            title: goal.title.clone(),
            description: goal.description.clone(),
            start_date: goal.start_date,
            end_date: goal.end_date,
        })
    }

    async fn get_goal(&self, goal_id: i64) -> Result<Option<Goal>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, title, description, start_date, end_date FROM goals WHERE id = ?1",
                params![goal_id],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::goal_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_goals(&self) -> Result<Vec<Goal>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, title, description, start_date, end_date FROM goals ORDER BY start_date, id",
                (),
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let mut goals = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            goals.push(Self::goal_from_row(&row)?);
        }
        Ok(goals)
    }

    async fn delete_goal(&self, goal_id: i64) -> Result<(), DomainError> {
        let conn = self.conn()?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        // Tasks first so a failed goal delete never orphans them.
        tx.execute("DELETE FROM tasks WHERE goal_id = ?1", params![goal_id])
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        tx.execute("DELETE FROM goals WHERE id = ?1", params![goal_id])
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        tx.commit()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }

    async fn insert_tasks(
        &self,
        goal_id: i64,
        entries: &[ScheduleEntry],
    ) -> Result<(), DomainError> {
        if entries.is_empty() {
            return Ok(());
        }
        let conn = self.conn()?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        for entry in entries {
            tx.execute(
                r#"
                INSERT INTO tasks (goal_id, date, description, completed)
                VALUES (?1, ?2, ?3, 0)
                "#,
                params![
                    goal_id,
                    Self::date_to_text(entry.date),
                    entry.description.as_str()
                ],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        info!(goal_id, count = entries.len(), "tasks persisted");
        Ok(())
    }

    async fn get_task(&self, task_id: i64) -> Result<Option<Task>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, goal_id, date, description, completed FROM tasks WHERE id = ?1",
                params![task_id],
            )
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?
        {
            Some(row) => Ok(Some(Self::task_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn tasks_for_goal(&self, goal_id: i64) -> Result<Vec<Task>, DomainError> {
        self.query_tasks(
            r#"
            SELECT id, goal_id, date, description, completed
            FROM tasks
            WHERE goal_id = ?1
            ORDER BY date, id
            "#,
            params![goal_id],
        )
        .await
    }

    async fn list_all_tasks(&self) -> Result<Vec<Task>, DomainError> {
        self.query_tasks(
            "SELECT id, goal_id, date, description, completed FROM tasks ORDER BY date, id",
            (),
        )
        .await
    }

    async fn tasks_on_date(&self, date: NaiveDate) -> Result<Vec<Task>, DomainError> {
        self.query_tasks(
            r#"
            SELECT id, goal_id, date, description, completed
            FROM tasks
            WHERE date = ?1
            ORDER BY id
            "#,
            params![Self::date_to_text(date)],
        )
        .await
    }

    async fn update_task_description(
        &self,
        task_id: i64,
        description: &str,
    ) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE tasks SET description = ?1 WHERE id = ?2",
            params![description, task_id],
        )
        .await
        .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }

    async fn set_task_completed(&self, task_id: i64, completed: bool) -> Result<(), DomainError> {
        let conn = self.conn()?;
        conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2",
            params![completed as i64, task_id],
        )
        .await
        .map_err(|e| DomainError::Repo(e.to_string()))?;
        Ok(())
    }
}
