//! The `aprovatec save` command.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::model::SemesterPayload;
use aprovatec_core::parser::parse_semester_file;
use aprovatec_core::sanitize::sanitize_all;
use aprovatec_core::traits::save_semester;
use aprovatec_core::validate::validate_semester;

use super::Workspace;

pub async fn execute(config: Option<PathBuf>, path: PathBuf, id: Option<String>) -> Result<()> {
    let form = parse_semester_file(&path)?;
    validate_semester(&form)?;

    let payload = SemesterPayload {
        year: form.year,
        term: form.term,
        disciplines: sanitize_all(&form.disciplines),
    };

    let ws = Workspace::load(config.as_deref())?;
    let client = ws.client()?;
    let saved = save_semester(&client, id.as_deref(), &payload).await?;

    let verb = if id.is_some() { "updated" } else { "created" };
    match saved.id_or(id.as_deref()) {
        Some(saved_id) => println!("Semester {} {verb} ({saved_id})", form.label()),
        None => println!("Semester {} {verb}", form.label()),
    }
    Ok(())
}
