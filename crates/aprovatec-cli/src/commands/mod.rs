//! Subcommand implementations and the helpers they share.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use aprovatec_client::{load_config_from, ApiClient, AprovatecConfig, Session};

pub mod auth;
pub mod check;
pub mod delete;
pub mod evaluate;
pub mod export;
pub mod fetch;
pub mod init;
pub mod list;
pub mod save;
pub mod validate;

/// Configuration plus the session stored next to it.
pub struct Workspace {
    pub config: AprovatecConfig,
    pub session_path: PathBuf,
    pub session: Session,
}

impl Workspace {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let session_path = config.session_path();
        let session = Session::load(&session_path)?;
        Ok(Self {
            config,
            session_path,
            session,
        })
    }

    /// A backend client carrying the current session token.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config, &self.session)
    }

    pub fn save_session(&self) -> Result<()> {
        self.session.save(&self.session_path)
    }
}

/// Password from the flag, or from `APROVATEC_PASSWORD`.
pub fn resolve_password(password: Option<String>) -> Result<String> {
    password
        .or_else(|| std::env::var("APROVATEC_PASSWORD").ok())
        .filter(|p| !p.is_empty())
        .context("no password given, pass --password or set APROVATEC_PASSWORD")
}

/// Two decimals, or a dash for "not defined yet".
pub fn fmt_score(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "—".to_string())
}
