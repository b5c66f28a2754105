//! The `aprovatec list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use aprovatec_core::model::StoredSemester;
use aprovatec_core::report::HistoryTotals;
use aprovatec_core::traits::GradesBackend;

use super::{fmt_score, Workspace};

#[derive(Serialize)]
struct ListOutput<'a> {
    totals: HistoryTotals,
    semesters: &'a [StoredSemester],
}

pub async fn execute(config: Option<PathBuf>, format: String) -> Result<()> {
    let ws = Workspace::load(config.as_deref())?;
    let semesters = ws.client()?.list_semesters().await?;
    let totals = HistoryTotals::from_semesters(&semesters);

    if format == "json" {
        let out = ListOutput {
            totals,
            semesters: &semesters,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if semesters.is_empty() {
        println!("No semesters stored yet. Run `aprovatec save <file>` to add one.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Semester", "Disciplines", "Average", "Status"]);
    for s in &semesters {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(s.label()),
            Cell::new(s.disciplines.len()),
            Cell::new(fmt_score(s.average)),
            Cell::new(s.approval_label()),
        ]);
    }
    println!("{table}");
    println!(
        "{} disciplines | {} approved | {} reproved | {} pending",
        totals.disciplines, totals.approved, totals.reproved, totals.pending
    );

    Ok(())
}
