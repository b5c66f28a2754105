//! The `aprovatec init` command.

use anyhow::Result;
use chrono::Datelike;

use aprovatec_core::model::{DisciplineForm, GradeSlot, SemesterForm, Term};
use aprovatec_core::parser::semester_to_toml;

pub fn execute() -> Result<()> {
    if std::path::Path::new("aprovatec.toml").exists() {
        println!("aprovatec.toml already exists, skipping.");
    } else {
        std::fs::write("aprovatec.toml", SAMPLE_CONFIG)?;
        println!("Created aprovatec.toml");
    }

    std::fs::create_dir_all("semesters")?;
    let example_path = std::path::Path::new("semesters/example.toml");
    if example_path.exists() {
        println!("semesters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, example_semester()?)?;
        println!("Created semesters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit semesters/example.toml with your disciplines and grades");
    println!("  2. Run: aprovatec evaluate semesters/example.toml");
    println!("  3. Run: aprovatec login --email you@example.com, then aprovatec save semesters/example.toml");

    Ok(())
}

/// A semester for the current year with one graded and one blank discipline.
fn example_semester() -> Result<String> {
    let now = chrono::Local::now();
    let term = if now.month() <= 6 {
        Term::First
    } else {
        Term::Second
    };
    let form = SemesterForm {
        year: now.year(),
        term,
        disciplines: vec![
            DisciplineForm::new("Cálculo I", "60", "2")
                .with_grade(GradeSlot::Av1, "7.5")
                .with_grade(GradeSlot::Av2, "8"),
            DisciplineForm::new("Algoritmos", "80", ""),
        ],
    };
    let body = semester_to_toml(&form)?;
    Ok(format!(
        "# Grades are 0-10. Leave a field out (or \"\") while it is not graded yet.\n\n{body}"
    ))
}

const SAMPLE_CONFIG: &str = r#"# aprovatec configuration

api_url = "http://localhost:3000"
timeout_secs = 30
# session_file = "${HOME}/.config/aprovatec/session.json"
"#;
