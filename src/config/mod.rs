mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = load_from(&config_path).await?;
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Reads a YAML config file; a missing file yields the defaults.
pub async fn load_from(path: &str) -> Result<Config> {
    let config_str = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    serde_yaml::from_str(&config_str).map_err(|e| Error::config(format!("{path}: {e}")))
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(base_url) = env::var("API_BASE_URL") {
        debug!("API base URL overridden from environment");
        config.api.base_url = base_url;
    }
    if let Ok(path) = env::var("SESSION_PATH") {
        debug!("Session path overridden from environment");
        config.session.path = PathBuf::from(path);
    }
}
