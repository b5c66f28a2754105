//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_url`.
pub const API_URL_ENV: &str = "APROVATEC_API_URL";

/// Top-level aprovatec configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprovatecConfig {
    /// Base URL of the grades backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Where the session is stored between invocations.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for AprovatecConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            session_file: None,
        }
    }
}

impl AprovatecConfig {
    /// The configured session file, or `~/.config/aprovatec/session.json`.
    pub fn session_path(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(|| {
            dirs_path()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("session.json")
        })
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `aprovatec.toml` in the current directory
/// 2. `~/.config/aprovatec/config.toml`
///
/// `APROVATEC_API_URL` overrides the backend URL.
pub fn load_config() -> Result<AprovatecConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AprovatecConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("aprovatec.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AprovatecConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AprovatecConfig::default(),
    };

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.api_url = url;
        }
    }

    config.api_url = resolve_env_vars(&config.api_url);
    config.session_file = config
        .session_file
        .as_ref()
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    tracing::debug!(api_url = %config.api_url, "configuration loaded");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("aprovatec"))
}
