//! Dashboard statistics derived from task lists. Pure functions.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::domain::{GoalStats, Task};

/// Compute completion stats over `tasks` as of `today`.
///
/// The streak counts consecutive calendar days with at least one completed
/// task, starting at `today` and walking backwards; a day without a
/// completed task ends it. Multiple completed tasks on one day count once.
pub fn goal_stats(tasks: &[Task], today: NaiveDate) -> GoalStats {
    let completed: u32 = tasks.iter().filter(|t| t.completed).count() as u32;
    let total = tasks.len() as u32;

    let completed_dates: HashSet<NaiveDate> = tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.date)
        .collect();

    let mut streak = 0;
    let mut day = today;
    while completed_dates.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }

    GoalStats {
        streak,
        active_days: completed,
        missing_days: total - completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(id: i64, day: &str, completed: bool) -> Task {
        Task {
            id,
            goal_id: 1,
            date: date(day),
            description: format!("task {id}"),
            completed,
        }
    }

    #[test]
    fn empty_tasks_all_zero() {
        let stats = goal_stats(&[], date("2024-03-10"));
        assert_eq!(
            stats,
            GoalStats {
                streak: 0,
                active_days: 0,
                missing_days: 0
            }
        );
    }

    #[test]
    fn counts_active_and_missing_days() {
        let tasks = vec![
            task(1, "2024-03-01", true),
            task(2, "2024-03-02", false),
            task(3, "2024-03-03", true),
        ];
        let stats = goal_stats(&tasks, date("2024-03-10"));
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.missing_days, 1);
    }

    #[test]
    fn streak_counts_back_from_today() {
        let tasks = vec![
            task(1, "2024-03-08", true),
            task(2, "2024-03-09", true),
            task(3, "2024-03-10", true),
        ];
        let stats = goal_stats(&tasks, date("2024-03-10"));
        assert_eq!(stats.streak, 3);
    }

    #[test]
    fn streak_zero_without_completion_today() {
        let tasks = vec![task(1, "2024-03-09", true)];
        let stats = goal_stats(&tasks, date("2024-03-10"));
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn gap_ends_streak() {
        let tasks = vec![
            task(1, "2024-03-07", true),
            task(2, "2024-03-09", true),
            task(3, "2024-03-10", true),
        ];
        let stats = goal_stats(&tasks, date("2024-03-10"));
        assert_eq!(stats.streak, 2);
    }

    #[test]
    fn incomplete_task_does_not_extend_streak() {
        let tasks = vec![
            task(1, "2024-03-09", false),
            task(2, "2024-03-10", true),
        ];
        let stats = goal_stats(&tasks, date("2024-03-10"));
        assert_eq!(stats.streak, 1);
    }

    #[test]
    fn duplicate_completed_dates_count_once() {
        let tasks = vec![
            task(1, "2024-03-10", true),
            task(2, "2024-03-10", true),
            task(3, "2024-03-09", true),
        ];
        let stats = goal_stats(&tasks, date("2024-03-10"));
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.active_days, 3);
    }
}
