//! TOML semester file parser.
//!
//! Loads semester forms from TOML files and directories, and writes them
//! back. Discipline fields may be written as numbers or strings; both are
//! kept as form text so the sanitizer sees exactly what a student typed.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{DisciplineForm, GradeSlot, SemesterForm, Term};

/// Intermediate TOML structure for parsing semester files.
#[derive(Debug, Deserialize)]
struct TomlSemesterFile {
    semester: TomlSemesterHeader,
    #[serde(default)]
    disciplines: Vec<TomlDiscipline>,
}

#[derive(Debug, Deserialize)]
struct TomlSemesterHeader {
    year: i32,
    term: u8,
}

#[derive(Debug, Deserialize)]
struct TomlDiscipline {
    #[serde(default)]
    name: String,
    #[serde(default)]
    workload: Option<FieldValue>,
    #[serde(default)]
    absences: Option<FieldValue>,
    #[serde(default)]
    av1: Option<FieldValue>,
    #[serde(default)]
    av2: Option<FieldValue>,
    #[serde(default)]
    av3: Option<FieldValue>,
    #[serde(default)]
    edag: Option<FieldValue>,
}

/// A form field as written in TOML: `60`, `7.5` or `"7.5"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
        }
    }
}

fn field_text(value: Option<FieldValue>) -> String {
    value.map(FieldValue::into_text).unwrap_or_default()
}

/// Parse a single TOML file into a `SemesterForm`.
pub fn parse_semester_file(path: &Path) -> Result<SemesterForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read semester file: {}", path.display()))?;

    parse_semester_str(&content, path)
}

/// Parse a TOML string into a `SemesterForm` (useful for testing).
pub fn parse_semester_str(content: &str, source_path: &Path) -> Result<SemesterForm> {
    let parsed: TomlSemesterFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let term = Term::try_from(parsed.semester.term)
        .with_context(|| format!("invalid semester in {}", source_path.display()))?;

    let disciplines = parsed
        .disciplines
        .into_iter()
        .map(|d| DisciplineForm {
            name: d.name,
            workload: field_text(d.workload),
            absences: field_text(d.absences),
            av1: field_text(d.av1),
            av2: field_text(d.av2),
            av3: field_text(d.av3),
            edag: field_text(d.edag),
            ..DisciplineForm::empty()
        })
        .collect();

    Ok(SemesterForm {
        year: parsed.semester.year,
        term,
        disciplines,
    })
}

/// Recursively load all `.toml` semester files from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_semester_directory(dir: &Path) -> Result<Vec<SemesterForm>> {
    let mut semesters = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            semesters.extend(load_semester_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_semester_file(&path) {
                Ok(semester) => semesters.push(semester),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(semesters)
}

/// Load a single file, or every semester under a directory.
pub fn load_semesters(path: &Path) -> Result<Vec<SemesterForm>> {
    if path.is_dir() {
        load_semester_directory(path)
    } else {
        Ok(vec![parse_semester_file(path)?])
    }
}

#[derive(Serialize)]
struct TomlSemesterOut<'a> {
    semester: TomlSemesterHeaderOut,
    disciplines: Vec<TomlDisciplineOut<'a>>,
}

#[derive(Serialize)]
struct TomlSemesterHeaderOut {
    year: i32,
    term: u8,
}

#[derive(Serialize)]
struct TomlDisciplineOut<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    workload: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    absences: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    av1: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    av2: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    av3: &'a str,
    #[serde(skip_serializing_if = "is_blank")]
    edag: &'a str,
}

fn is_blank(text: &&str) -> bool {
    text.is_empty()
}

/// Render a semester form as TOML that [`parse_semester_str`] reads back.
pub fn semester_to_toml(form: &SemesterForm) -> Result<String> {
    let out = TomlSemesterOut {
        semester: TomlSemesterHeaderOut {
            year: form.year,
            term: form.term.into(),
        },
        disciplines: form
            .disciplines
            .iter()
            .map(|d| TomlDisciplineOut {
                name: &d.name,
                workload: &d.workload,
                absences: &d.absences,
                av1: d.grade_text(GradeSlot::Av1),
                av2: d.grade_text(GradeSlot::Av2),
                av3: d.grade_text(GradeSlot::Av3),
                edag: d.grade_text(GradeSlot::Edag),
            })
            .collect(),
    };
    toml::to_string_pretty(&out).context("failed to serialize semester")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[semester]
year = 2025
term = 1

[[disciplines]]
name = "Cálculo I"
workload = 60
absences = "4"
av1 = 7.5
av2 = "8"
av3 = ""

[[disciplines]]
name = "Física"
workload = "40"
"#;

    #[test]
    fn parse_valid_toml() {
        let form = parse_semester_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(form.year, 2025);
        assert_eq!(form.term, Term::First);
        assert_eq!(form.disciplines.len(), 2);

        let calc = &form.disciplines[0];
        assert_eq!(calc.name, "Cálculo I");
        assert_eq!(calc.workload, "60");
        assert_eq!(calc.absences, "4");
        assert_eq!(calc.av1, "7.5");
        assert_eq!(calc.av2, "8");
        assert_eq!(calc.av3, "");
        assert_eq!(calc.edag, "");

        assert_eq!(form.disciplines[1].absences, "");
        assert_ne!(form.disciplines[0].id, form.disciplines[1].id);
    }

    #[test]
    fn parse_without_disciplines() {
        let toml = "[semester]\nyear = 2024\nterm = 2\n";
        let form = parse_semester_str(toml, &PathBuf::from("empty.toml")).unwrap();
        assert_eq!(form.term, Term::Second);
        assert!(form.disciplines.is_empty());
    }

    #[test]
    fn invalid_term_is_an_error() {
        let toml = "[semester]\nyear = 2024\nterm = 3\n";
        let err = parse_semester_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("invalid term 3"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_semester_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn toml_round_trip_keeps_blank_fields_blank() {
        let form = parse_semester_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let text = semester_to_toml(&form).unwrap();
        let again = parse_semester_str(&text, &PathBuf::from("again.toml")).unwrap();
        assert_eq!(again.disciplines[0].av1, "7.5");
        assert_eq!(again.disciplines[0].av3, "");
        assert_eq!(again.disciplines[1].workload, "40");
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("2025-1.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let semesters = load_semester_directory(dir.path()).unwrap();
        assert_eq!(semesters.len(), 1);
        assert_eq!(semesters[0].year, 2025);

        let single = load_semesters(&dir.path().join("2025-1.toml")).unwrap();
        assert_eq!(single.len(), 1);
    }
}
