//! Report generation module for student records
//!
//! This module renders a student's dashboard (profile, grades, attendance,
//! internships, fees and notifications) as Markdown, HTML or PDF, and holds the
//! diagram generators for the schema and login flow.

pub mod formats;
pub mod visualization;

use crate::core::academics::StudentSummary;
use crate::core::models::University;
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

pub use formats::{HtmlReporter, MarkdownReporter, PdfReporter, ReportFormat};
pub use visualization::{Flowchart, MermaidGenerator, SvgRenderer};

/// Errors raised while producing a report
#[derive(Debug, Error)]
pub enum ReportError {
    /// No student with the given enrollment number
    #[error("no student with enrollment number '{0}'")]
    UnknownStudent(String),

    /// Unrecognised report format name
    #[error("unknown report format '{0}' (expected markdown, html or pdf)")]
    UnknownFormat(String),

    /// The HTML template failed to render
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),

    /// Writing the report failed
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),

    /// HTML-to-PDF conversion failed
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

/// Data context for report generation
///
/// Aggregates everything a template needs so that every format reads the same
/// figures.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Records the student belongs to
    pub university: &'a University,
    /// Computed dashboard figures
    pub summary: &'a StudentSummary<'a>,
    /// Date printed on the report
    pub generated: NaiveDate,
}

impl<'a> ReportContext<'a> {
    /// Create a context dated today
    #[must_use]
    pub fn new(university: &'a University, summary: &'a StudentSummary<'a>) -> Self {
        Self {
            university,
            summary,
            generated: chrono::Local::now().date_naive(),
        }
    }

    /// Override the report date
    #[must_use]
    pub const fn with_date(mut self, generated: NaiveDate) -> Self {
        self.generated = generated;
        self
    }

    /// Institution name
    #[must_use]
    pub fn institution(&self) -> &str {
        &self.university.name
    }

    /// Academic year label, or "-" when the records carry none
    #[must_use]
    pub fn academic_year(&self) -> &str {
        if self.university.academic_year.is_empty() {
            "-"
        } else {
            &self.university.academic_year
        }
    }

    /// Student's full name
    #[must_use]
    pub fn student_name(&self) -> String {
        self.summary.student.full_name()
    }

    /// Suggested file stem: `<enrollment>_report`
    #[must_use]
    pub fn file_stem(&self) -> String {
        let enrollment: String = self
            .summary
            .student
            .enrollment_number
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("{enrollment}_report")
    }
}

/// Format an amount with two decimals
pub(crate) fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError>;
}
