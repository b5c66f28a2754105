//! Semester evaluation engine.
//!
//! Derives averages, statuses, absence limits and remaining-score
//! projections from sanitized discipline records. Everything here is a pure
//! function of its input: no state, no I/O, and the same input always yields
//! bit-identical output.

use serde::{Deserialize, Serialize};

use crate::model::{
    Discipline, DisciplineForm, DisciplineStatus, GradeSlot, GradeWeights, ABSENCE_LIMIT_RATIO,
    ABSENCE_WARNING_RATIO, MAX_GRADE, PASSING_AVERAGE,
};
use crate::sanitize::sanitize_all;
use crate::statistics::{round2, weighted_mean};

/// Figures derived for a single discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineResult {
    /// Final weighted average, only once every assessment is graded.
    pub average: Option<f64>,
    pub status: DisciplineStatus,
    /// Maximum absence hours allowed.
    pub limit_absences: f64,
    /// Average still needed on the ungraded assessments to reach the passing mark.
    pub required_score: Option<f64>,
    /// Final average if every ungraded assessment scores the maximum.
    pub max_achievable: f64,
    /// Uppercased names of the ungraded assessments, in slot order.
    pub missing_assessments: Vec<String>,
}

/// What is still possible for a discipline, for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Every assessment is graded.
    Complete,
    /// The passing mark is reachable with this average on the remaining assessments.
    Reachable { required_score: f64 },
    /// Even maximum grades leave the average below the passing mark.
    Unreachable { max_achievable: f64 },
}

impl DisciplineResult {
    pub fn projection(&self) -> Projection {
        match self.required_score {
            None => Projection::Complete,
            Some(required_score) if required_score <= MAX_GRADE => {
                Projection::Reachable { required_score }
            }
            Some(_) => Projection::Unreachable {
                max_achievable: self.max_achievable,
            },
        }
    }
}

/// Aggregate figures for a whole semester, plus the per-discipline results
/// in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterEvaluation {
    pub disciplines: Vec<DisciplineResult>,
    /// Workload-weighted mean over the disciplines with a final average.
    pub average: Option<f64>,
    /// `Some(true)` if everything is approved, `Some(false)` on any failure,
    /// `None` while the outcome is still open.
    pub approved: Option<bool>,
}

/// Evaluate one discipline with the standard weights.
pub fn evaluate_discipline(discipline: &Discipline) -> DisciplineResult {
    evaluate_discipline_with(discipline, &GradeWeights::STANDARD)
}

/// Evaluate one discipline with explicit weights.
pub fn evaluate_discipline_with(discipline: &Discipline, weights: &GradeWeights) -> DisciplineResult {
    let mut missing_assessments = Vec::new();
    let mut weighted_sum = 0.0;
    let mut filled_weight = 0.0;

    for slot in GradeSlot::ALL {
        let weight = weights.weight(slot);
        match discipline.grade(slot) {
            Some(grade) => {
                weighted_sum += grade * weight;
                filled_weight += weight;
            }
            None => missing_assessments.push(slot.label().to_string()),
        }
    }

    let missing_weight = 1.0 - filled_weight;
    // <= 0 absorbs floating-point noise once every slot is filled
    let complete = missing_weight <= 0.0;

    let average = complete.then(|| round2(weighted_sum));
    let required_score = (!complete)
        .then(|| round2(((PASSING_AVERAGE - weighted_sum) / missing_weight).max(0.0)));

    let limit_absences = round2(discipline.workload * ABSENCE_LIMIT_RATIO);
    let max_achievable = round2(weighted_sum + missing_weight.max(0.0) * MAX_GRADE);

    let absence_risk = discipline.absences >= limit_absences * ABSENCE_WARNING_RATIO;
    let failed_by_absence = discipline.absences > limit_absences;
    let partial_average = (filled_weight > 0.0).then(|| round2(weighted_sum / filled_weight));

    let status = if failed_by_absence {
        DisciplineStatus::ReprovadoFalta
    } else if let Some(average) = average {
        if average >= PASSING_AVERAGE {
            DisciplineStatus::Aprovado
        } else {
            DisciplineStatus::ReprovadoNota
        }
    } else {
        let grade_risk = required_score.is_some_and(|r| r >= PASSING_AVERAGE)
            || partial_average.is_some_and(|p| p < PASSING_AVERAGE);
        if absence_risk || grade_risk {
            DisciplineStatus::EmRisco
        } else {
            DisciplineStatus::EmAndamento
        }
    };

    tracing::debug!(
        discipline = %discipline.name,
        weighted_sum,
        filled_weight,
        ?partial_average,
        absence_risk,
        status = %status,
        "evaluated discipline"
    );

    DisciplineResult {
        average,
        status,
        limit_absences,
        required_score,
        max_achievable,
        missing_assessments,
    }
}

/// Evaluate every discipline of a semester and aggregate the results.
pub fn evaluate_semester(disciplines: &[Discipline]) -> SemesterEvaluation {
    let results: Vec<DisciplineResult> = disciplines.iter().map(evaluate_discipline).collect();

    let average = weighted_mean(
        disciplines
            .iter()
            .zip(&results)
            .filter_map(|(d, r)| r.average.map(|avg| (avg, d.workload))),
    )
    .map(round2);

    let approved = semester_approval(&results);

    SemesterEvaluation {
        disciplines: results,
        average,
        approved,
    }
}

fn semester_approval(results: &[DisciplineResult]) -> Option<bool> {
    let all_approved =
        !results.is_empty() && results.iter().all(|r| r.status == DisciplineStatus::Aprovado);
    if all_approved {
        Some(true)
    } else if results.iter().any(|r| r.status.is_failed()) {
        Some(false)
    } else {
        None
    }
}

/// Sanitize raw form rows and evaluate them.
///
/// Returns the sanitized records (the submission payload) alongside the
/// evaluation, both in row order.
pub fn evaluate_forms(forms: &[DisciplineForm]) -> (Vec<Discipline>, SemesterEvaluation) {
    let sanitized = sanitize_all(forms);
    let evaluation = evaluate_semester(&sanitized);
    (sanitized, evaluation)
}
