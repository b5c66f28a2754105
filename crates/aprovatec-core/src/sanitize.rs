//! Conversion between form text and typed discipline records.
//!
//! Sanitizing is permissive: it never fails. Workload and absences fall back
//! to 0, grades fall back to unset. Rejecting incomplete rows is the job of
//! [`crate::validate`].

use crate::model::{Discipline, DisciplineForm, GradeSlot, StoredDiscipline};

/// Parse a numeric form field. Blank, non-numeric and non-finite text yields `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Workload/absence parsing: anything that is not a number counts as 0.
pub fn parse_number_or_zero(text: &str) -> f64 {
    parse_number(text).unwrap_or(0.0)
}

/// Grade parsing: anything that is not a number is "not graded yet".
pub fn parse_grade(text: &str) -> Option<f64> {
    parse_number(text)
}

/// Convert one form row into a typed record.
pub fn sanitize_discipline(form: &DisciplineForm) -> Discipline {
    Discipline {
        name: form.name.trim().to_string(),
        workload: parse_number_or_zero(&form.workload),
        absences: parse_number_or_zero(&form.absences),
        av1: parse_grade(&form.av1),
        av2: parse_grade(&form.av2),
        av3: parse_grade(&form.av3),
        edag: parse_grade(&form.edag),
    }
}

pub fn sanitize_all(forms: &[DisciplineForm]) -> Vec<Discipline> {
    forms.iter().map(sanitize_discipline).collect()
}

/// Load a stored discipline back into an editable form row.
///
/// A zero workload becomes blank so the submission check asks for it again.
pub fn form_from_stored(stored: &StoredDiscipline) -> DisciplineForm {
    let mut form = DisciplineForm {
        name: stored.name.clone(),
        workload: if stored.workload != 0.0 {
            stored.workload.to_string()
        } else {
            String::new()
        },
        absences: stored.absences.map(|v| v.to_string()).unwrap_or_default(),
        ..DisciplineForm::empty()
    };
    for slot in GradeSlot::ALL {
        let value = match slot {
            GradeSlot::Av1 => stored.av1,
            GradeSlot::Av2 => stored.av2,
            GradeSlot::Av3 => stored.av3,
            GradeSlot::Edag => stored.edag,
        };
        *form.grade_text_mut(slot) = value.map(|v| v.to_string()).unwrap_or_default();
    }
    form
}

/// Load every stored discipline into form rows. An empty list yields one blank row.
pub fn forms_from_stored(stored: &[StoredDiscipline]) -> Vec<DisciplineForm> {
    if stored.is_empty() {
        return vec![DisciplineForm::empty()];
    }
    stored.iter().map(form_from_stored).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_grade_is_unset_but_zero_is_kept() {
        let form = DisciplineForm::new("Algoritmos", "60", "0")
            .with_grade(GradeSlot::Av1, "0")
            .with_grade(GradeSlot::Av2, "")
            .with_grade(GradeSlot::Av3, "   ");
        let d = sanitize_discipline(&form);
        assert_eq!(d.av1, Some(0.0));
        assert_eq!(d.av2, None);
        assert_eq!(d.av3, None);
        assert_eq!(d.edag, None);
    }

    #[test]
    fn non_numeric_text() {
        let form = DisciplineForm::new("  Redes  ", "sessenta", "")
            .with_grade(GradeSlot::Av1, "7,5")
            .with_grade(GradeSlot::Edag, "NaN")
            .with_grade(GradeSlot::Av2, "inf");
        let d = sanitize_discipline(&form);
        assert_eq!(d.name, "Redes");
        assert_eq!(d.workload, 0.0);
        assert_eq!(d.absences, 0.0);
        assert_eq!(d.av1, None);
        assert_eq!(d.av2, None);
        assert_eq!(d.edag, None);
    }

    #[test]
    fn numbers_with_surrounding_whitespace() {
        let form = DisciplineForm::new("BD", " 80 ", "4.5").with_grade(GradeSlot::Av3, " 9.25");
        let d = sanitize_discipline(&form);
        assert_eq!(d.workload, 80.0);
        assert_eq!(d.absences, 4.5);
        assert_eq!(d.av3, Some(9.25));
    }

    #[test]
    fn stored_back_to_form() {
        let stored = StoredDiscipline {
            id: Some("x".into()),
            name: "Física".into(),
            workload: 0.0,
            absences: Some(3.0),
            av1: Some(7.5),
            av2: Some(0.0),
            av3: None,
            edag: None,
            average: None,
            status: None,
            limit_absences: None,
            required_score: None,
            max_achievable: None,
            missing_assessments: vec![],
        };
        let form = form_from_stored(&stored);
        assert_eq!(form.workload, "");
        assert_eq!(form.absences, "3");
        assert_eq!(form.av1, "7.5");
        assert_eq!(form.av2, "0");
        assert_eq!(form.av3, "");
        assert!(!form.id.is_empty());

        let again = sanitize_discipline(&form);
        assert_eq!(again.av2, Some(0.0));
        assert_eq!(again.av3, None);
    }

    #[test]
    fn empty_stored_list_gives_one_blank_row() {
        let rows = forms_from_stored(&[]);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].name.is_empty());
    }
}
