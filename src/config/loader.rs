//! Configuration loading and environment overrides.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration: defaults, then an optional TOML file, then the
/// environment. Presence is the only validation applied to env values.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => ProxyConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Environment variables override file values.
pub fn apply_env_overrides(config: &mut ProxyConfig) {
    if let Ok(owner) = env::var("DEFAULT_OWNER") {
        config.github.default_owner = owner;
    }
    if let Ok(repo) = env::var("DEFAULT_REPO") {
        config.github.default_repo = repo;
    }
    if let Ok(branch) = env::var("DEFAULT_BRANCH") {
        config.github.default_branch = branch;
    }
    if let Ok(base_url) = env::var("GITHUB_RAW_BASE_URL") {
        config.github.raw_base_url = base_url;
    }
    if let Ok(bind) = env::var("BIND_ADDRESS") {
        config.listener.bind_address = bind;
    }
}
