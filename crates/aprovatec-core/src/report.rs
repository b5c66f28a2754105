//! Evaluation reports with JSON persistence, backend consistency checks and
//! history totals.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{evaluate_semester, SemesterEvaluation};
use crate::model::{semester_label, Discipline, SemesterForm, StoredSemester, Term};
use crate::sanitize::sanitize_all;

/// A snapshot of one semester's evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub year: i32,
    pub term: Term,
    /// Sanitized disciplines, in input order.
    pub disciplines: Vec<Discipline>,
    pub evaluation: SemesterEvaluation,
}

impl SemesterReport {
    /// Evaluate a semester as a set of sanitized disciplines.
    pub fn new(year: i32, term: Term, disciplines: Vec<Discipline>) -> Self {
        let evaluation = evaluate_semester(&disciplines);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            year,
            term,
            disciplines,
            evaluation,
        }
    }

    pub fn from_form(form: &SemesterForm) -> Self {
        Self::new(form.year, form.term, sanitize_all(&form.disciplines))
    }

    /// Re-evaluate a stored semester locally, ignoring the backend's figures.
    pub fn from_stored(stored: &StoredSemester) -> Self {
        let disciplines = stored
            .disciplines
            .iter()
            .map(|d| d.to_discipline())
            .collect();
        Self::new(stored.year, stored.term, disciplines)
    }

    pub fn label(&self) -> String {
        semester_label(self.year, self.term)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SemesterReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// Result of comparing the backend's stored figures with a local evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub semesters_checked: usize,
    /// Number of individual figures compared.
    pub fields_checked: usize,
    pub mismatches: Vec<Mismatch>,
}

/// A figure the backend stored differently from what the engine computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Semester label (`"2025.1"`).
    pub semester: String,
    /// Discipline name, or `None` for semester-level figures.
    pub discipline: Option<String>,
    pub field: String,
    pub stored: String,
    pub computed: String,
}

fn show_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "null".into())
}

fn show_flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "null".into())
}

/// Collects comparisons for one semester.
struct Checker<'a> {
    semester: String,
    report: &'a mut ConsistencyReport,
}

impl Checker<'_> {
    fn check(&mut self, discipline: Option<&str>, field: &str, stored: String, computed: String) {
        self.report.fields_checked += 1;
        if stored != computed {
            self.report.mismatches.push(Mismatch {
                semester: self.semester.clone(),
                discipline: discipline.map(str::to_string),
                field: field.to_string(),
                stored,
                computed,
            });
        }
    }

    /// Figures the backend did not send are skipped.
    fn check_number(&mut self, discipline: Option<&str>, field: &str, stored: Option<f64>, computed: Option<f64>) {
        if stored.is_some() {
            self.check(discipline, field, show_number(stored), show_number(computed));
        }
    }
}

/// Re-evaluate every stored semester and list where the backend disagrees.
///
/// Numbers are compared exactly: both sides are expected to round the same
/// way.
pub fn check_consistency(semesters: &[StoredSemester]) -> ConsistencyReport {
    let mut report = ConsistencyReport::default();

    for stored in semesters {
        let local = SemesterReport::from_stored(stored);
        let eval = &local.evaluation;
        let mut checker = Checker {
            semester: stored.label(),
            report: &mut report,
        };

        checker.check_number(None, "average", stored.average, eval.average);
        if stored.approved.is_some() {
            checker.check(
                None,
                "approved",
                show_flag(stored.approved),
                show_flag(eval.approved),
            );
        }

        for (disc, result) in stored.disciplines.iter().zip(&eval.disciplines) {
            let name = Some(disc.name.as_str());
            checker.check_number(name, "average", disc.average, result.average);
            if let Some(status) = &disc.status {
                checker.check(name, "status", status.clone(), result.status.to_string());
            }
            checker.check_number(
                name,
                "limitAbsences",
                disc.limit_absences,
                Some(result.limit_absences),
            );
            checker.check_number(name, "requiredScore", disc.required_score, result.required_score);
            checker.check_number(
                name,
                "maxAchievable",
                disc.max_achievable,
                Some(result.max_achievable),
            );
        }

        report.semesters_checked += 1;
    }

    if !report.mismatches.is_empty() {
        tracing::warn!(
            mismatches = report.mismatches.len(),
            "stored figures disagree with local evaluation"
        );
    }

    report
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Format the consistency report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} semesters, {} figures checked, {} mismatches\n\n",
            self.semesters_checked,
            self.fields_checked,
            self.mismatches.len()
        ));

        if !self.mismatches.is_empty() {
            md.push_str("### Mismatches\n\n");
            md.push_str("| Semester | Discipline | Field | Stored | Computed |\n");
            md.push_str("|----------|------------|-------|--------|----------|\n");
            for m in &self.mismatches {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    m.semester,
                    m.discipline.as_deref().unwrap_or("—"),
                    m.field,
                    m.stored,
                    m.computed
                ));
            }
        }

        md
    }
}

/// Dashboard counters over the stored history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTotals {
    pub semesters: usize,
    pub disciplines: usize,
    pub approved: usize,
    pub reproved: usize,
    pub pending: usize,
}

impl HistoryTotals {
    pub fn from_semesters(semesters: &[StoredSemester]) -> Self {
        let mut totals = HistoryTotals {
            semesters: semesters.len(),
            ..Default::default()
        };
        for s in semesters {
            totals.disciplines += s.disciplines.len();
            match s.approved {
                Some(true) => totals.approved += 1,
                Some(false) => totals.reproved += 1,
                None => totals.pending += 1,
            }
        }
        totals
    }
}
