//! Application configuration. API credential, endpoint, data directory.

use serde::Deserialize;

/// Default public endpoint for the Generative Language API (up to /models).
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model the original deployment used.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Gemini API key. Read from MILESTONES_GEMINI_API_KEY (or bare GEMINI_API_KEY).
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Base URL up to /models. Defaults to the public Generative Language API.
    /// Read from MILESTONES_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gemini-1.5-pro". Read from MILESTONES_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Directory for goals.db. Defaults to ./data. Read from MILESTONES_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MILESTONES"));
        if let Ok(path) = std::env::var("MILESTONES_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // GEMINI_API_KEY is read directly (no MILESTONES_ prefix) so .env files
        // from the original deployment keep working.
        if cfg.gemini_api_key.is_none() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                cfg.gemini_api_key = Some(key);
            }
        }
        Ok(cfg)
    }

    /// Returns the Gemini API key if configured.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
    }

    /// Returns the API base URL. Defaults to the public endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Returns the model name. Defaults to "gemini-1.5-pro".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    /// Returns the data directory. Defaults to ./data.
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns true if the AI service is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.gemini_api_key().is_some()
    }
}
