//! Application use cases. Orchestrate domain logic via ports.

pub mod assistant_service;
pub mod goal_service;
pub mod schedule_service;
pub mod validation_service;

pub use assistant_service::AssistantService;
pub use goal_service::{CreatedGoal, GoalService};
pub use schedule_service::ScheduleService;
pub use validation_service::ValidationService;
