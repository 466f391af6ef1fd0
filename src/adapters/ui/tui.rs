//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Menu loop: dashboard, goal creation, daily tasks with response validation,
//! task editing, goal deletion, assistant chat.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, InquireError, Select, Text};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{DomainError, Goal, Task};
use crate::usecases::{AssistantService, GoalService};

const MENU_DASHBOARD: &str = "Dashboard";
const MENU_NEW_GOAL: &str = "New goal";
const MENU_TODAY: &str = "Today's tasks";
const MENU_GOAL_DETAILS: &str = "Goal details";
const MENU_EDIT_TASK: &str = "Edit a task";
const MENU_DELETE_GOAL: &str = "Delete a goal";
const MENU_CHAT: &str = "Chat with the assistant";
const MENU_QUIT: &str = "Quit";

/// TUI adapter. Inquire prompts over the goal and assistant services.
pub struct TuiInputPort {
    goals: Arc<GoalService>,
    assistant: Arc<AssistantService>,
}

impl TuiInputPort {
    pub fn new(goals: Arc<GoalService>, assistant: Arc<AssistantService>) -> Self {
        Self { goals, assistant }
    }

    async fn dashboard(&self) -> Result<(), DomainError> {
        let goals = self.goals.list_goals().await?;
        let stats = self.goals.stats().await?;

        println!(
            "\nStreak: {} day(s) | Completed tasks: {} | Remaining tasks: {}\n",
            stats.streak, stats.active_days, stats.missing_days
        );
        if goals.is_empty() {
            println!("No goals yet. Create one to get a daily schedule.\n");
        }
        for goal in &goals {
            println!(
                "#{} {} ({} to {})",
                goal.id, goal.title, goal.start_date, goal.end_date
            );
        }
        Ok(())
    }

    async fn new_goal(&self) -> Result<(), DomainError> {
        let title = prompt_text("Goal title:")?;
        let description = prompt_text("Description:")?;
        let start_date = prompt_date("Start date (YYYY-MM-DD):")?;
        let end_date = prompt_date("End date (YYYY-MM-DD):")?;

        let spinner = spinner("Generating schedule...");
        let created = self
            .goals
            .create_goal(crate::domain::NewGoal {
                title,
                description,
                start_date,
                end_date,
            })
            .await;
        spinner.finish_and_clear();

        match created {
            Ok(created) if created.tasks_generated > 0 => {
                println!(
                    "Goal and schedule created: {} task(s) over {} to {}.",
                    created.tasks_generated, created.goal.start_date, created.goal.end_date
                );
            }
            Ok(created) => {
                println!(
                    "Goal '{}' created, but the schedule could not be generated.",
                    created.goal.title
                );
            }
            Err(DomainError::Input(msg)) => println!("Cannot create goal: {msg}"),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn today(&self) -> Result<(), DomainError> {
        let today = Local::now().date_naive();
        let tasks = self.goals.tasks_on_date(today).await?;
        if tasks.is_empty() {
            println!("Nothing scheduled for {today}.");
            return Ok(());
        }

        let Some(task) = select_task("Today's tasks", &tasks)? else {
            return Ok(());
        };
        println!("\n{}\n", task.description);
        if task.completed {
            println!("Already completed.");
            return Ok(());
        }

        let response = prompt_text("What did you learn? (your response is validated)")?;
        let spinner = spinner("Validating response...");
        let result = self.goals.submit_response(task.id, &response).await;
        spinner.finish_and_clear();

        match result {
            Ok(result) => {
                if result.is_valid {
                    println!("Task completed. {}", result.feedback);
                } else {
                    println!("Not quite yet. {}", result.feedback);
                }
            }
            Err(DomainError::Input(msg)) => println!("{msg}"),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn goal_details(&self) -> Result<(), DomainError> {
        let Some(goal) = self.select_goal("Which goal?").await? else {
            return Ok(());
        };
        let tasks = self.goals.tasks_for_goal(goal.id).await?;
        println!("\n{} ({} to {})", goal.title, goal.start_date, goal.end_date);
        for task in &tasks {
            let mark = if task.completed { "x" } else { " " };
            let first_line = task.description.lines().next().unwrap_or("");
            println!("[{mark}] {} {}", task.date, first_line);
        }
        Ok(())
    }

    async fn edit_task(&self) -> Result<(), DomainError> {
        let Some(goal) = self.select_goal("Which goal?").await? else {
            return Ok(());
        };
        let tasks = self.goals.tasks_for_goal(goal.id).await?;
        let Some(task) = select_task("Which task?", &tasks)? else {
            return Ok(());
        };

        let description = prompt_text("New description:")?;
        self.goals.update_task_description(task.id, &description).await?;
        println!("Task updated.");
        Ok(())
    }

    async fn delete_goal(&self) -> Result<(), DomainError> {
        let Some(goal) = self.select_goal("Delete which goal?").await? else {
            return Ok(());
        };
        let confirmed = Confirm::new(&format!(
            "Delete '{}' and all its tasks?",
            goal.title
        ))
        .with_default(false)
        .prompt()
        .unwrap_or(false);

        if confirmed {
            self.goals.delete_goal(goal.id).await?;
            println!("Goal deleted.");
        }
        Ok(())
    }

    async fn chat(&self) -> Result<(), DomainError> {
        println!("Assistant chat. Empty message returns to the menu.");
        let mut context: Option<String> = None;

        loop {
            let message = prompt_text("You:")?;
            if message.trim().is_empty() {
                return Ok(());
            }

            let spinner = spinner("Thinking...");
            let reply = self.assistant.chat(&message, context.as_deref()).await;
            spinner.finish_and_clear();

            if reply.success {
                let text = reply.response.unwrap_or_default();
                println!("Assistant: {text}\n");
                context = Some(format!("User: {message}\nAssistant: {text}"));
            } else {
                println!(
                    "Assistant unavailable: {}",
                    reply.error.unwrap_or_else(|| "unknown error".into())
                );
            }
        }
    }

    async fn select_goal(&self, prompt: &str) -> Result<Option<Goal>, DomainError> {
        let goals = self.goals.list_goals().await?;
        if goals.is_empty() {
            println!("No goals yet.");
            return Ok(None);
        }
        let options: Vec<String> = goals
            .iter()
            .map(|g| format!("#{} {} ({} to {})", g.id, g.title, g.start_date, g.end_date))
            .collect();
        match Select::new(prompt, options.clone()).prompt() {
            Ok(choice) => {
                let idx = options.iter().position(|o| *o == choice).unwrap_or(0);
                Ok(Some(goals[idx].clone()))
            }
            Err(InquireError::OperationCanceled) => Ok(None),
            Err(e) => Err(DomainError::Ui(e.to_string())),
        }
    }
}

#[async_trait]
impl crate::ports::InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let options = vec![
                MENU_DASHBOARD,
                MENU_NEW_GOAL,
                MENU_TODAY,
                MENU_GOAL_DETAILS,
                MENU_EDIT_TASK,
                MENU_DELETE_GOAL,
                MENU_CHAT,
                MENU_QUIT,
            ];
            let choice = match Select::new("What next?", options).prompt() {
                Ok(c) => c,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(e) => return Err(DomainError::Ui(e.to_string())),
            };

            match choice {
                MENU_DASHBOARD => self.dashboard().await?,
                MENU_NEW_GOAL => self.new_goal().await?,
                MENU_TODAY => self.today().await?,
                MENU_GOAL_DETAILS => self.goal_details().await?,
                MENU_EDIT_TASK => self.edit_task().await?,
                MENU_DELETE_GOAL => self.delete_goal().await?,
                MENU_CHAT => self.chat().await?,
                _ => return Ok(()),
            }
        }
    }
}

fn prompt_text(prompt: &str) -> Result<String, DomainError> {
    Text::new(prompt)
        .prompt()
        .map_err(|e| DomainError::Ui(e.to_string()))
}

fn prompt_date(prompt: &str) -> Result<NaiveDate, DomainError> {
    loop {
        let raw = prompt_text(prompt)?;
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => return Ok(date),
            Err(_) => println!("Dates must look like 2024-03-01."),
        }
    }
}

fn select_task<'a>(prompt: &str, tasks: &'a [Task]) -> Result<Option<&'a Task>, DomainError> {
    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(None);
    }
    let options: Vec<String> = tasks
        .iter()
        .map(|t| {
            let mark = if t.completed { "x" } else { " " };
            let first_line = t.description.lines().next().unwrap_or("");
            format!("[{mark}] {} {} (#{})", t.date, first_line, t.id)
        })
        .collect();
    match Select::new(prompt, options.clone()).prompt() {
        Ok(choice) => {
            let idx = options.iter().position(|o| *o == choice).unwrap_or(0);
            Ok(Some(&tasks[idx]))
        }
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
