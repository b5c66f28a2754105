//! The `aprovatec export` command.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::parser::parse_semester_file;
use aprovatec_core::report::SemesterReport;
use aprovatec_core::traits::GradesBackend;
use aprovatec_report::{write_history_report, write_semester_report};

use super::Workspace;

pub async fn execute(
    config: Option<PathBuf>,
    path: Option<PathBuf>,
    output: PathBuf,
) -> Result<()> {
    match path {
        Some(path) => {
            let form = parse_semester_file(&path)?;
            let report = SemesterReport::from_form(&form);
            write_semester_report(&report, &output)?;
        }
        None => {
            let ws = Workspace::load(config.as_deref())?;
            let semesters = ws.client()?.list_semesters().await?;
            write_history_report(&semesters, &output)?;
        }
    }

    println!("HTML report: {}", output.display());
    Ok(())
}
