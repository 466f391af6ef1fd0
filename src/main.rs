//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;

use milestones::adapters::ai::{GeminiAdapter, MockCompletionAdapter};
use milestones::adapters::persistence::SqliteRepo;
use milestones::adapters::ui::TuiInputPort;
use milestones::ports::{GoalRepoPort, InputPort, TextCompletionPort};
use milestones::shared::AppConfig;
use milestones::usecases::{AssistantService, GoalService, ScheduleService, ValidationService};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    milestones::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();

    let data_dir = cfg.data_dir_or_default();
    let data_path = PathBuf::from(&data_dir);
    info!(path = %data_path.display(), "data directory");

    let repo: Arc<dyn GoalRepoPort> = Arc::new(
        SqliteRepo::connect(&data_path)
            .await
            .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
    );

    // --- Text completion: Gemini when configured, offline mock otherwise.
    // The mock fails every call, so schedules come from the deterministic
    // fallback generator and validation degrades gracefully.
    let ai: Arc<dyn TextCompletionPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "Gemini completion enabled"
        );
        Arc::new(GeminiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.gemini_api_key().unwrap_or_default(),
            cfg.ai_model_or_default(),
        ))
    } else {
        warn!("GEMINI_API_KEY not set, running offline with fallback schedules");
        Arc::new(MockCompletionAdapter::new())
    };

    // --- Services ---
    let schedule_service = Arc::new(ScheduleService::new(Arc::clone(&ai)));
    let validation_service = Arc::new(ValidationService::new(Arc::clone(&ai)));
    let assistant_service = Arc::new(AssistantService::new(Arc::clone(&ai)));
    let goal_service = Arc::new(GoalService::new(
        Arc::clone(&repo),
        schedule_service,
        validation_service,
    ));

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(goal_service, assistant_service));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
