mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub async fn load() -> Result<Config> {
    // A missing .env is the normal case in deployments.
    dotenv::dotenv().ok();

    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    load_from(&config_path, |key| env::var(key).ok()).await
}

/// Reads `config_path` if it exists, applies overrides from `lookup`, and
/// validates the result.
pub async fn load_from<F>(config_path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if tokio::fs::try_exists(config_path).await? {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(config_path).await?;
        from_yaml(&config_str)?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    apply_env_overrides(&mut config, lookup)?;
    validate(&config)?;

    Ok(config)
}

pub fn from_yaml(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Applies `GEMINI_API_KEY`, `HOST` and `PORT` from `lookup` on top of `config`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup(API_KEY_VAR).filter(|v| !v.trim().is_empty()) {
        config.llm.api_key = api_key;
    }

    if let Some(host) = lookup("HOST").filter(|v| !v.trim().is_empty()) {
        config.server.host = host;
    }

    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }

    Ok(())
}

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        return Err(Error::config(format!(
            "{} is not set and no llm.api_key is configured",
            API_KEY_VAR
        )));
    }

    if config.media.max_results == 0 {
        return Err(Error::config("media.max_results must be at least 1"));
    }

    Ok(())
}
