//! aprovatec-report — printable exports of semester evaluations.
//!
//! Every export is a single self-contained HTML file meant to be opened in a
//! browser and printed (or saved as PDF).

pub mod html;

pub use html::{
    generate_history_html, generate_semester_html, write_history_report, write_semester_report,
};
