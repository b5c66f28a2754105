//! The `aprovatec login`, `register` and `logout` commands.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::traits::{AuthBackend, LoginRequest, RegisterRequest};

use super::{resolve_password, Workspace};

pub async fn login(config: Option<PathBuf>, email: String, password: Option<String>) -> Result<()> {
    let mut ws = Workspace::load(config.as_deref())?;
    let request = LoginRequest {
        email,
        password: resolve_password(password)?,
    };

    let response = ws.client()?.login(&request).await?;
    ws.session.init(response.token, response.user);
    ws.save_session()?;

    if let Some(user) = ws.session.user() {
        println!("Logged in as {} <{}>", user.name, user.email);
    }
    tracing::debug!(session = %ws.session_path.display(), "session saved");
    Ok(())
}

pub async fn register(
    config: Option<PathBuf>,
    name: String,
    email: String,
    password: Option<String>,
) -> Result<()> {
    let ws = Workspace::load(config.as_deref())?;
    let request = RegisterRequest {
        name,
        email,
        password: resolve_password(password)?,
    };

    let response = ws.client()?.register(&request).await?;
    println!("{}", response.message_or_default());
    println!("Next: aprovatec login --email {}", request.email);
    Ok(())
}

pub fn logout(config: Option<PathBuf>) -> Result<()> {
    let mut ws = Workspace::load(config.as_deref())?;
    if !ws.session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    ws.session.clear();
    ws.save_session()?;
    println!("Logged out.");
    Ok(())
}
