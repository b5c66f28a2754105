//! The `aprovatec validate` command.

use std::path::PathBuf;

use anyhow::Result;

use aprovatec_core::parser::load_semesters;
use aprovatec_core::validate::{lint_semester, validate_semester};

pub fn execute(path: PathBuf) -> Result<()> {
    let forms = load_semesters(&path)?;

    let mut total_warnings = 0;
    let mut total_errors = 0;

    for form in &forms {
        println!(
            "Semester: {} ({} disciplines)",
            form.label(),
            form.disciplines.len()
        );

        if let Err(e) = validate_semester(form) {
            println!("  ERROR: {e}");
            total_errors += 1;
        }

        let warnings = lint_semester(form);
        for w in &warnings {
            println!("  [#{}] WARNING: {}", w.row, w.message);
        }
        total_warnings += warnings.len();
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} semester(s) cannot be saved");
    }

    if total_warnings == 0 {
        println!("All semesters valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
