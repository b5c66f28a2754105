//! Core error types.
//!
//! The evaluation engine itself is total and never fails. These errors come
//! from the edges around it: decoding a semester identity and checking a
//! semester before it is submitted to the backend.

use thiserror::Error;

/// A semester term outside the supported `1 | 2` range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid term {0}: expected 1 or 2")]
pub struct TermError(pub u8);

/// Reasons a semester cannot be submitted yet.
///
/// Rows are 1-based, matching how they are numbered on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A discipline has an empty (or whitespace-only) name.
    #[error("Informe o nome de todas as disciplinas. (disciplina #{row})")]
    MissingName { row: usize },

    /// A discipline has a blank, non-numeric or non-positive workload.
    #[error("Informe a carga horária de todas as disciplinas. (disciplina #{row})")]
    MissingWorkload { row: usize },

    /// The year is outside the range the form accepts.
    #[error("ano {year} fora do intervalo permitido ({min}-{max})")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

impl ValidationError {
    /// The offending row, if the error is about a single discipline.
    pub fn row(&self) -> Option<usize> {
        match self {
            ValidationError::MissingName { row } | ValidationError::MissingWorkload { row } => {
                Some(*row)
            }
            ValidationError::YearOutOfRange { .. } => None,
        }
    }
}
