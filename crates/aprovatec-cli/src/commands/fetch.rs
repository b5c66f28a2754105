//! The `aprovatec fetch` command.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::model::SemesterForm;
use aprovatec_core::parser::semester_to_toml;
use aprovatec_core::sanitize::forms_from_stored;
use aprovatec_core::traits::GradesBackend;

use super::Workspace;

pub async fn execute(config: Option<PathBuf>, id: String, output: Option<PathBuf>) -> Result<()> {
    let ws = Workspace::load(config.as_deref())?;
    let semesters = ws.client()?.list_semesters().await?;
    let stored = semesters
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow::anyhow!("no stored semester with id {id}"))?;

    let form = SemesterForm {
        year: stored.year,
        term: stored.term,
        disciplines: forms_from_stored(&stored.disciplines),
    };
    let text = semester_to_toml(&form)?;

    match output {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!(
                "Semester {} written to {}. Save changes with: aprovatec save {} --id {id}",
                form.label(),
                path.display(),
                path.display()
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}
