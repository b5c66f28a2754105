//! The signed-in session, persisted to a JSON file between invocations.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use aprovatec_core::model::User;

/// Token and account of the signed-in user.
///
/// Note: Custom Debug impl masks the token to prevent accidental exposure in logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session after a successful login.
    pub fn init(&mut self, token: impl Into<String>, user: User) {
        self.token = Some(token.into());
        self.user = Some(user);
    }

    /// Forget the token and user.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Load a session file. A missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse session: {}", path.display()))
    }

    /// Save the session as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session: {}", path.display()))?;
        Ok(())
    }
}
