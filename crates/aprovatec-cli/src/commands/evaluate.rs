//! The `aprovatec evaluate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use aprovatec_core::engine::{DisciplineResult, Projection};
use aprovatec_core::model::approval_label;
use aprovatec_core::parser::load_semesters;
use aprovatec_core::report::SemesterReport;
use aprovatec_core::validate::lint_semester;

use super::fmt_score;

pub fn execute(path: PathBuf, format: String, output: Option<PathBuf>) -> Result<()> {
    let forms = load_semesters(&path)?;
    if forms.is_empty() {
        anyhow::bail!("no semester files found in {}", path.display());
    }
    if output.is_some() && forms.len() > 1 {
        anyhow::bail!("--output needs a single semester file, found {}", forms.len());
    }

    let mut reports = Vec::with_capacity(forms.len());
    for form in &forms {
        for w in lint_semester(form) {
            eprintln!("  [{} #{}] WARNING: {}", form.label(), w.row, w.message);
        }
        reports.push(SemesterReport::from_form(form));
    }

    match format.as_str() {
        "json" => {
            if let [report] = reports.as_slice() {
                println!("{}", serde_json::to_string_pretty(report)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
        }
        _ => {
            for report in &reports {
                print_report(report);
            }
        }
    }

    if let (Some(path), [report]) = (output, reports.as_slice()) {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

/// What the student still needs, in words.
pub fn projection_text(result: &DisciplineResult) -> String {
    match result.projection() {
        Projection::Complete => "-".to_string(),
        Projection::Reachable { required_score } => format!(
            "needs {required_score:.2} in {}",
            result.missing_assessments.join(", ")
        ),
        Projection::Unreachable { max_achievable } => {
            format!("unreachable (max {max_achievable:.2})")
        }
    }
}

fn print_report(report: &SemesterReport) {
    let eval = &report.evaluation;

    let mut table = Table::new();
    table.set_header(vec![
        "Discipline",
        "Workload",
        "Absences",
        "AV1",
        "AV2",
        "AV3",
        "EDAG",
        "Average",
        "Status",
        "Projection",
    ]);

    for (d, r) in report.disciplines.iter().zip(&eval.disciplines) {
        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(d.workload),
            Cell::new(format!("{} / {:.2}", d.absences, r.limit_absences)),
            Cell::new(fmt_score(d.av1)),
            Cell::new(fmt_score(d.av2)),
            Cell::new(fmt_score(d.av3)),
            Cell::new(fmt_score(d.edag)),
            Cell::new(fmt_score(r.average)),
            Cell::new(r.status.label()),
            Cell::new(projection_text(r)),
        ]);
    }

    println!(
        "Semester {} ({} disciplines)",
        report.label(),
        report.disciplines.len()
    );
    println!("{table}");
    println!(
        "Semester average: {} | {}\n",
        fmt_score(eval.average),
        approval_label(eval.approved)
    );
}
