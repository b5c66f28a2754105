//! The `aprovatec check` command.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::report::check_consistency;
use aprovatec_core::traits::GradesBackend;

use super::Workspace;

pub async fn execute(config: Option<PathBuf>, format: String, fail_on_mismatch: bool) -> Result<()> {
    let ws = Workspace::load(config.as_deref())?;
    let semesters = ws.client()?.list_semesters().await?;
    let report = check_consistency(&semesters);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Checked {} semesters ({} figures): {} mismatches",
                report.semesters_checked,
                report.fields_checked,
                report.mismatches.len()
            );
            for m in &report.mismatches {
                let target = match &m.discipline {
                    Some(d) => format!("{} / {d}", m.semester),
                    None => m.semester.clone(),
                };
                println!(
                    "  {target}: {} stored {} but computes {}",
                    m.field, m.stored, m.computed
                );
            }
        }
    }

    if fail_on_mismatch && !report.is_consistent() {
        std::process::exit(1);
    }

    Ok(())
}
