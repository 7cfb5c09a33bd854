use marketgenius_studio::StudioConfig;
use tracing_subscriber::EnvFilter;

/// Loads `.env`, installs a log subscriber and reads the studio config.
pub fn setup() -> StudioConfig {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    StudioConfig::from_env().expect("GEMINI_API_KEY environment variable must be set")
}
