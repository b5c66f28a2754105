//! Submission checks for semester forms.
//!
//! [`validate_semester`] is the gate before a semester is sent to the
//! backend and stops at the first problem. [`lint_semester`] reports
//! non-blocking warnings about values the sanitizer will quietly coerce.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::{DisciplineForm, GradeSlot, SemesterForm, MAX_GRADE};
use crate::sanitize::parse_number;

/// Earliest year the semester form accepts.
pub const MIN_YEAR: i32 = 2000;
/// Latest year the semester form accepts.
pub const MAX_YEAR: i32 = 2100;

/// Check that every row can be submitted. Rows are checked in order.
pub fn validate_disciplines(forms: &[DisciplineForm]) -> Result<(), ValidationError> {
    for (index, form) in forms.iter().enumerate() {
        let row = index + 1;
        if form.name.trim().is_empty() {
            return Err(ValidationError::MissingName { row });
        }
        match parse_number(&form.workload) {
            Some(workload) if workload > 0.0 => {}
            _ => return Err(ValidationError::MissingWorkload { row }),
        }
    }
    Ok(())
}

/// Check a whole semester: the year range first, then every row.
pub fn validate_semester(form: &SemesterForm) -> Result<(), ValidationError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&form.year) {
        return Err(ValidationError::YearOutOfRange {
            year: form.year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        });
    }
    validate_disciplines(&form.disciplines)
}

/// A non-blocking remark about a semester form.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// 1-based row the warning refers to.
    pub row: usize,
    pub message: String,
}

/// Collect warnings about values that will be coerced or look mistyped.
pub fn lint_semester(form: &SemesterForm) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_names = HashSet::new();
    for (index, disc) in form.disciplines.iter().enumerate() {
        let row = index + 1;
        let name = disc.name.trim().to_lowercase();
        if !name.is_empty() && !seen_names.insert(name) {
            warnings.push(ValidationWarning {
                row,
                message: format!("duplicate discipline name: {}", disc.name.trim()),
            });
        }
    }

    for (index, disc) in form.disciplines.iter().enumerate() {
        let row = index + 1;

        if let Some(absences) = parse_number(&disc.absences) {
            if absences < 0.0 {
                warnings.push(ValidationWarning {
                    row,
                    message: format!("absences are negative ({absences})"),
                });
            }
        } else if !disc.absences.trim().is_empty() {
            warnings.push(ValidationWarning {
                row,
                message: format!("absences '{}' is not a number, 0 will be used", disc.absences),
            });
        }

        for slot in GradeSlot::ALL {
            let text = disc.grade_text(slot);
            match parse_number(text) {
                Some(grade) if !(0.0..=MAX_GRADE).contains(&grade) => {
                    warnings.push(ValidationWarning {
                        row,
                        message: format!("{slot} grade {grade} is outside 0-10"),
                    });
                }
                Some(_) => {}
                None if !text.trim().is_empty() => {
                    warnings.push(ValidationWarning {
                        row,
                        message: format!("{slot} '{text}' is not a number and will be left ungraded"),
                    });
                }
                None => {}
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Term;

    fn semester(disciplines: Vec<DisciplineForm>) -> SemesterForm {
        SemesterForm {
            year: 2025,
            term: Term::First,
            disciplines,
        }
    }

    #[test]
    fn valid_semester() {
        let form = semester(vec![
            DisciplineForm::new("Cálculo I", "60", ""),
            DisciplineForm::new("Física", "40", "2"),
        ]);
        assert_eq!(validate_semester(&form), Ok(()));
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = semester(vec![
            DisciplineForm::new("Cálculo I", "60", ""),
            DisciplineForm::new("   ", "40", ""),
        ]);
        assert_eq!(
            validate_semester(&form),
            Err(ValidationError::MissingName { row: 2 })
        );
    }

    #[test]
    fn workload_must_be_positive() {
        for workload in ["", "0", "-10", "abc"] {
            let form = semester(vec![DisciplineForm::new("Física", workload, "")]);
            assert_eq!(
                validate_semester(&form),
                Err(ValidationError::MissingWorkload { row: 1 }),
                "workload {workload:?}"
            );
        }
    }

    #[test]
    fn first_failing_row_wins() {
        let form = semester(vec![
            DisciplineForm::new("Física", "", ""),
            DisciplineForm::new("", "40", ""),
        ]);
        assert_eq!(
            validate_semester(&form),
            Err(ValidationError::MissingWorkload { row: 1 })
        );
    }

    #[test]
    fn year_range() {
        let mut form = semester(vec![DisciplineForm::new("Física", "40", "")]);
        form.year = 1999;
        assert!(matches!(
            validate_semester(&form),
            Err(ValidationError::YearOutOfRange { year: 1999, .. })
        ));
    }

    #[test]
    fn empty_semester_is_valid() {
        assert_eq!(validate_semester(&semester(vec![])), Ok(()));
    }

    #[test]
    fn lint_reports_coerced_values() {
        let form = semester(vec![
            DisciplineForm::new("Física", "40", "-1")
                .with_grade(GradeSlot::Av1, "11")
                .with_grade(GradeSlot::Av2, "7,5"),
            DisciplineForm::new("física", "40", "x"),
        ]);
        let warnings = lint_semester(&form);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("negative")));
        assert!(warnings
            .iter()
            .any(|w| w.row == 1 && w.message.contains("AV1 grade 11")));
        assert!(warnings
            .iter()
            .any(|w| w.row == 1 && w.message.contains("AV2 '7,5'")));
        assert!(warnings
            .iter()
            .any(|w| w.row == 2 && w.message.contains("absences 'x'")));
    }

    #[test]
    fn lint_clean_form() {
        let form = semester(vec![DisciplineForm::new("Física", "40", "2")
            .with_grade(GradeSlot::Av1, "10")
            .with_grade(GradeSlot::Edag, "0")]);
        assert!(lint_semester(&form).is_empty());
    }
}
