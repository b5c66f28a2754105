//! Core data model types for aprovatec.
//!
//! Three layers of the same discipline live here: the raw form row as typed
//! by the student ([`DisciplineForm`]), the sanitized record the engine and
//! the backend consume ([`Discipline`]), and the stored record the backend
//! returns with its own derived figures ([`StoredDiscipline`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TermError;

/// Average a discipline needs to be approved.
pub const PASSING_AVERAGE: f64 = 7.0;

/// Highest grade a single assessment can receive.
pub const MAX_GRADE: f64 = 10.0;

/// Share of the workload a student may miss before failing by absence.
pub const ABSENCE_LIMIT_RATIO: f64 = 0.25;

/// Share of the absence limit at which a discipline is flagged at risk.
pub const ABSENCE_WARNING_RATIO: f64 = 0.8;

/// One of the four weighted assessments of a discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeSlot {
    Av1,
    Av2,
    Av3,
    Edag,
}

impl GradeSlot {
    /// All slots, in evaluation order.
    pub const ALL: [GradeSlot; 4] = [GradeSlot::Av1, GradeSlot::Av2, GradeSlot::Av3, GradeSlot::Edag];

    /// Field name used in forms and on the wire (`"av1"`).
    pub fn key(self) -> &'static str {
        match self {
            GradeSlot::Av1 => "av1",
            GradeSlot::Av2 => "av2",
            GradeSlot::Av3 => "av3",
            GradeSlot::Edag => "edag",
        }
    }

    /// Uppercased name used in `missingAssessments` and on screen (`"AV1"`).
    pub fn label(self) -> &'static str {
        match self {
            GradeSlot::Av1 => "AV1",
            GradeSlot::Av2 => "AV2",
            GradeSlot::Av3 => "AV3",
            GradeSlot::Edag => "EDAG",
        }
    }
}

impl fmt::Display for GradeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GradeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "av1" => Ok(GradeSlot::Av1),
            "av2" => Ok(GradeSlot::Av2),
            "av3" => Ok(GradeSlot::Av3),
            "edag" => Ok(GradeSlot::Edag),
            other => Err(format!("unknown assessment: {other}")),
        }
    }
}

/// Weight of each assessment in the final average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeWeights {
    pub av1: f64,
    pub av2: f64,
    pub av3: f64,
    pub edag: f64,
}

impl GradeWeights {
    /// The institution-wide weights: 25% / 25% / 30% / 20%.
    pub const STANDARD: GradeWeights = GradeWeights {
        av1: 0.25,
        av2: 0.25,
        av3: 0.30,
        edag: 0.20,
    };

    pub fn weight(&self, slot: GradeSlot) -> f64 {
        match slot {
            GradeSlot::Av1 => self.av1,
            GradeSlot::Av2 => self.av2,
            GradeSlot::Av3 => self.av3,
            GradeSlot::Edag => self.edag,
        }
    }

    /// Sum of all weights, in slot order.
    pub fn total(&self) -> f64 {
        GradeSlot::ALL.iter().map(|&s| self.weight(s)).sum()
    }
}

impl Default for GradeWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Outcome of evaluating a discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisciplineStatus {
    /// All grades entered and the average reached the passing mark.
    Aprovado,
    /// All grades entered and the average is below the passing mark.
    ReprovadoNota,
    /// Absences exceeded the limit; grades no longer matter.
    ReprovadoFalta,
    /// Still in progress but heading towards failure.
    EmRisco,
    /// Still in progress with nothing flagged.
    EmAndamento,
}

impl DisciplineStatus {
    /// Human-readable label shown next to a discipline.
    pub fn label(self) -> &'static str {
        match self {
            DisciplineStatus::Aprovado => "Aprovado",
            DisciplineStatus::ReprovadoNota => "Reprovado por nota",
            DisciplineStatus::ReprovadoFalta => "Reprovado por falta",
            DisciplineStatus::EmRisco => "Em risco",
            DisciplineStatus::EmAndamento => "Em andamento",
        }
    }

    /// Wire code (`"REPROVADO_NOTA"`).
    pub fn code(self) -> &'static str {
        match self {
            DisciplineStatus::Aprovado => "APROVADO",
            DisciplineStatus::ReprovadoNota => "REPROVADO_NOTA",
            DisciplineStatus::ReprovadoFalta => "REPROVADO_FALTA",
            DisciplineStatus::EmRisco => "EM_RISCO",
            DisciplineStatus::EmAndamento => "EM_ANDAMENTO",
        }
    }

    pub fn is_failed(self) -> bool {
        matches!(
            self,
            DisciplineStatus::ReprovadoNota | DisciplineStatus::ReprovadoFalta
        )
    }
}

impl fmt::Display for DisciplineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DisciplineStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "APROVADO" => Ok(DisciplineStatus::Aprovado),
            "REPROVADO_NOTA" => Ok(DisciplineStatus::ReprovadoNota),
            "REPROVADO_FALTA" => Ok(DisciplineStatus::ReprovadoFalta),
            "EM_RISCO" => Ok(DisciplineStatus::EmRisco),
            "EM_ANDAMENTO" => Ok(DisciplineStatus::EmAndamento),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Academic term within a year. Serialized as the integer `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Term {
    First,
    Second,
}

impl TryFrom<u8> for Term {
    type Error = TermError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Term::First),
            2 => Ok(Term::Second),
            other => Err(TermError(other)),
        }
    }
}

impl From<Term> for u8 {
    fn from(term: Term) -> Self {
        match term {
            Term::First => 1,
            Term::Second => 2,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// `"2025.1"`-style label for a semester.
pub fn semester_label(year: i32, term: Term) -> String {
    format!("{year}.{term}")
}

/// One discipline row exactly as typed into the form.
///
/// Every numeric field is kept as text so that "not graded yet" (blank) and
/// "scored zero" (`"0"`) stay distinct until sanitization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisciplineForm {
    /// Row identifier, local to the form. Never sent to the backend.
    #[serde(default = "new_row_id", skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub workload: String,
    #[serde(default)]
    pub absences: String,
    #[serde(default)]
    pub av1: String,
    #[serde(default)]
    pub av2: String,
    #[serde(default)]
    pub av3: String,
    #[serde(default)]
    pub edag: String,
}

pub(crate) fn new_row_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl DisciplineForm {
    /// A blank row with a fresh id.
    pub fn empty() -> Self {
        Self {
            id: new_row_id(),
            name: String::new(),
            workload: String::new(),
            absences: String::new(),
            av1: String::new(),
            av2: String::new(),
            av3: String::new(),
            edag: String::new(),
        }
    }

    /// A row with name, workload and absences filled in and no grades.
    pub fn new(name: &str, workload: &str, absences: &str) -> Self {
        Self {
            name: name.to_string(),
            workload: workload.to_string(),
            absences: absences.to_string(),
            ..Self::empty()
        }
    }

    /// Builder-style setter for one grade field.
    pub fn with_grade(mut self, slot: GradeSlot, value: &str) -> Self {
        *self.grade_text_mut(slot) = value.to_string();
        self
    }

    pub fn grade_text(&self, slot: GradeSlot) -> &str {
        match slot {
            GradeSlot::Av1 => &self.av1,
            GradeSlot::Av2 => &self.av2,
            GradeSlot::Av3 => &self.av3,
            GradeSlot::Edag => &self.edag,
        }
    }

    pub fn grade_text_mut(&mut self, slot: GradeSlot) -> &mut String {
        match slot {
            GradeSlot::Av1 => &mut self.av1,
            GradeSlot::Av2 => &mut self.av2,
            GradeSlot::Av3 => &mut self.av3,
            GradeSlot::Edag => &mut self.edag,
        }
    }
}

impl Default for DisciplineForm {
    fn default() -> Self {
        Self::empty()
    }
}

/// A sanitized discipline: what the engine evaluates and the backend stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub name: String,
    #[serde(default)]
    pub workload: f64,
    #[serde(default)]
    pub absences: f64,
    #[serde(default)]
    pub av1: Option<f64>,
    #[serde(default)]
    pub av2: Option<f64>,
    #[serde(default)]
    pub av3: Option<f64>,
    #[serde(default)]
    pub edag: Option<f64>,
}

impl Discipline {
    /// A discipline with no grades entered yet.
    pub fn new(name: &str, workload: f64, absences: f64) -> Self {
        Self {
            name: name.to_string(),
            workload,
            absences,
            av1: None,
            av2: None,
            av3: None,
            edag: None,
        }
    }

    /// Builder-style setter for one grade.
    pub fn with_grade(mut self, slot: GradeSlot, value: f64) -> Self {
        *self.grade_mut(slot) = Some(value);
        self
    }

    pub fn grade(&self, slot: GradeSlot) -> Option<f64> {
        match slot {
            GradeSlot::Av1 => self.av1,
            GradeSlot::Av2 => self.av2,
            GradeSlot::Av3 => self.av3,
            GradeSlot::Edag => self.edag,
        }
    }

    pub fn grade_mut(&mut self, slot: GradeSlot) -> &mut Option<f64> {
        match slot {
            GradeSlot::Av1 => &mut self.av1,
            GradeSlot::Av2 => &mut self.av2,
            GradeSlot::Av3 => &mut self.av3,
            GradeSlot::Edag => &mut self.edag,
        }
    }
}

/// A semester being edited: identity plus raw discipline rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterForm {
    pub year: i32,
    pub term: Term,
    #[serde(default)]
    pub disciplines: Vec<DisciplineForm>,
}

impl SemesterForm {
    pub fn label(&self) -> String {
        semester_label(self.year, self.term)
    }
}

/// Body of `POST /grades` and `PUT /grades/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterPayload {
    pub year: i32,
    pub term: Term,
    pub disciplines: Vec<Discipline>,
}

/// A discipline as returned by the backend, with its own derived figures.
///
/// The derived fields are whatever the backend computed when it stored the
/// semester; all of them are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDiscipline {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub workload: f64,
    #[serde(default)]
    pub absences: Option<f64>,
    #[serde(default)]
    pub av1: Option<f64>,
    #[serde(default)]
    pub av2: Option<f64>,
    #[serde(default)]
    pub av3: Option<f64>,
    #[serde(default)]
    pub edag: Option<f64>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit_absences: Option<f64>,
    #[serde(default)]
    pub required_score: Option<f64>,
    #[serde(default)]
    pub max_achievable: Option<f64>,
    #[serde(default)]
    pub missing_assessments: Vec<String>,
}

impl StoredDiscipline {
    /// The stored status, with unknown or missing values shown as in progress.
    pub fn status(&self) -> DisciplineStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DisciplineStatus::EmAndamento)
    }

    /// The sanitized fields, as the engine would receive them.
    pub fn to_discipline(&self) -> Discipline {
        Discipline {
            name: self.name.clone(),
            workload: self.workload,
            absences: self.absences.unwrap_or(0.0),
            av1: self.av1,
            av2: self.av2,
            av3: self.av3,
            edag: self.edag,
        }
    }
}

/// A semester as returned by `GET /grades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSemester {
    #[serde(rename = "_id")]
    pub id: String,
    pub year: i32,
    pub term: Term,
    #[serde(default)]
    pub disciplines: Vec<StoredDiscipline>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub approved: Option<bool>,
}

impl StoredSemester {
    pub fn label(&self) -> String {
        semester_label(self.year, self.term)
    }

    /// "Aprovado", "Reprovado" or "Pendente".
    pub fn approval_label(&self) -> &'static str {
        approval_label(self.approved)
    }
}

/// Label for a semester-level approval flag.
pub fn approval_label(approved: Option<bool>) -> &'static str {
    match approved {
        Some(true) => "Aprovado",
        Some(false) => "Reprovado",
        None => "Pendente",
    }
}

/// An authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_weights_sum_to_one() {
        assert_eq!(GradeWeights::STANDARD.total(), 1.0);
        assert_eq!(GradeWeights::default(), GradeWeights::STANDARD);
    }

    #[test]
    fn slot_names_and_parse() {
        let labels: Vec<&str> = GradeSlot::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["AV1", "AV2", "AV3", "EDAG"]);
        assert_eq!("EDAG".parse::<GradeSlot>().unwrap(), GradeSlot::Edag);
        assert_eq!(" av2 ".parse::<GradeSlot>().unwrap(), GradeSlot::Av2);
        assert!("av4".parse::<GradeSlot>().is_err());
    }

    #[test]
    fn status_display_and_parse() {
        assert_eq!(DisciplineStatus::ReprovadoFalta.to_string(), "REPROVADO_FALTA");
        assert_eq!(
            "em_risco".parse::<DisciplineStatus>().unwrap(),
            DisciplineStatus::EmRisco
        );
        assert!("PASSED".parse::<DisciplineStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&DisciplineStatus::EmAndamento).unwrap(),
            "\"EM_ANDAMENTO\""
        );
    }

    #[test]
    fn term_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Term::Second).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Term>("1").unwrap(), Term::First);
        assert!(serde_json::from_str::<Term>("3").is_err());
        assert_eq!(semester_label(2025, Term::First), "2025.1");
    }

    #[test]
    fn discipline_payload_keeps_unset_grades_as_null() {
        let d = Discipline::new("Cálculo I", 60.0, 2.0).with_grade(GradeSlot::Av1, 0.0);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["av1"], serde_json::json!(0.0));
        assert!(json["av2"].is_null());
    }

    #[test]
    fn stored_semester_from_backend_json() {
        let json = r#"{
            "_id": "abc123",
            "year": 2024,
            "term": 2,
            "average": 7.6,
            "approved": true,
            "disciplines": [{
                "_id": "d1",
                "name": "Física",
                "workload": 40,
                "absences": 2,
                "av1": 8, "av2": 6, "av3": 9, "edag": 7,
                "average": 7.6,
                "status": "APROVADO",
                "limitAbsences": 10,
                "requiredScore": null,
                "maxAchievable": 7.6,
                "missingAssessments": []
            }, {
                "name": "Química",
                "workload": 60,
                "status": "SOMETHING_NEW"
            }]
        }"#;
        let s: StoredSemester = serde_json::from_str(json).unwrap();
        assert_eq!(s.label(), "2024.2");
        assert_eq!(s.approval_label(), "Aprovado");
        assert_eq!(s.disciplines[0].status(), DisciplineStatus::Aprovado);
        assert_eq!(s.disciplines[0].limit_absences, Some(10.0));
        assert_eq!(s.disciplines[1].status(), DisciplineStatus::EmAndamento);
        assert_eq!(s.disciplines[1].to_discipline().absences, 0.0);
        assert_eq!(s.disciplines[1].av1, None);
    }

    #[test]
    fn form_row_ids_are_unique_and_not_serialized() {
        let a = DisciplineForm::empty();
        let b = DisciplineForm::empty();
        assert_ne!(a.id, b.id);
        let json = serde_json::to_value(&a).unwrap();
        assert!(json.get("id").is_none());
    }
}
