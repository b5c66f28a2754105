//! The `aprovatec delete` command.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::traits::GradesBackend;

use super::Workspace;

pub async fn execute(config: Option<PathBuf>, id: String) -> Result<()> {
    let ws = Workspace::load(config.as_deref())?;
    ws.client()?.delete_semester(&id).await?;
    println!("Semester {id} deleted.");
    Ok(())
}
