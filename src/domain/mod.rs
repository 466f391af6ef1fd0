//! Core domain layer. No external I/O dependencies.
//!
//! Entities, business rules, curriculum tables, and reply parsers live here.
//! Dependencies flow inward.

pub mod curriculum;
pub mod entities;
pub mod errors;
pub mod reply;
pub mod stats;

pub use entities::{
    AssistantReply, Goal, GoalStats, NewGoal, ScheduleEntry, Task, ValidationResult,
};
pub use errors::DomainError;
