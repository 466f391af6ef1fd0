//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/SQL types here — these are mapped from adapters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user-defined learning goal spanning a date range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Insertion form of [`Goal`]: everything but the repo-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One day's unit of work under a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub goal_id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub completed: bool,
}

/// A (date, description) pair produced by the schedule generator.
///
/// Transient: the caller persists it as a [`Task`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub description: String,
}

/// Verdict plus feedback from validating a user's free-text response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub feedback: String,
}

/// Outcome of one assistant chat turn. On failure `response` is absent
/// and `error` carries the detail.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantReply {
    pub success: bool,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl AssistantReply {
    pub fn ok(response: String) -> Self {
        Self {
            success: true,
            response: Some(response),
            error: None,
        }
    }

    pub fn err(detail: String) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(detail),
        }
    }
}

/// Dashboard statistics over all tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalStats {
    /// Consecutive days with a completed task, counting back from today.
    pub streak: u32,
    /// Number of completed tasks.
    pub active_days: u32,
    /// Number of tasks not yet completed.
    pub missing_days: u32,
}
