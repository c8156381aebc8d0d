//! Export per-student summaries to CSV

use super::academics::{round2, AttendanceBand, StudentSummary, SummaryOptions};
use crate::core::models::University;
use std::error::Error;
use std::path::Path;

/// Trait for exporting cohort summaries in different formats
pub trait SummaryExporter {
    /// Export the summary of every student in the records
    ///
    /// # Errors
    /// Returns an error if export fails
    fn export(
        &self,
        university: &University,
        options: &SummaryOptions,
        output_path: &Path,
    ) -> Result<(), Box<dyn Error>>;
}

/// One student's line in the cohort export
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    /// Enrollment number
    pub enrollment: String,
    /// Full name
    pub name: String,
    /// Programme name
    pub programme: String,
    /// Semester the figures refer to
    pub semester: u32,
    /// GPA for that semester
    pub semester_gpa: f64,
    /// GPA over all graded semesters
    pub cumulative_gpa: f64,
    /// Overall attendance percentage
    pub attendance: f64,
    /// Attendance band
    pub band: AttendanceBand,
    /// Internship credits earned
    pub internship_credits: u32,
    /// Outstanding fees for the current structure
    pub fee_balance: f64,
}

impl From<&StudentSummary<'_>> for StudentRow {
    fn from(summary: &StudentSummary<'_>) -> Self {
        Self {
            enrollment: summary.student.enrollment_number.clone(),
            name: summary.student.full_name(),
            programme: summary.programme.clone(),
            semester: summary.semester,
            semester_gpa: summary.semester_gpa,
            cumulative_gpa: summary.cumulative_gpa,
            attendance: summary.attendance.percentage,
            band: summary.attendance.band,
            internship_credits: summary.internship_credits.total,
            fee_balance: summary.fees.balance,
        }
    }
}

/// Cohort-level statistics plus the per-student rows
#[derive(Debug, Clone, PartialEq)]
pub struct CohortSummary {
    /// Number of students exported
    pub student_count: usize,
    /// Mean cumulative GPA across the cohort (0.0 for an empty cohort)
    pub mean_gpa: f64,
    /// Students with recorded attendance below the warning threshold
    pub below_warning: usize,
    /// One row per student, ordered by enrollment number
    pub rows: Vec<StudentRow>,
}

impl CohortSummary {
    /// Build summaries for every student in the records
    #[must_use]
    pub fn build(university: &University, options: &SummaryOptions) -> Self {
        let summaries: Vec<StudentSummary> = university
            .students()
            .into_iter()
            .map(|student| StudentSummary::build(university, student, options))
            .collect();

        let below_warning = summaries
            .iter()
            .filter(|s| s.attendance.total > 0 && s.attendance.band == AttendanceBand::Critical)
            .count();

        let rows: Vec<StudentRow> = summaries.iter().map(StudentRow::from).collect();

        #[allow(clippy::cast_precision_loss)]
        let mean_gpa = if rows.is_empty() {
            0.0
        } else {
            round2(rows.iter().map(|r| r.cumulative_gpa).sum::<f64>() / rows.len() as f64)
        };

        Self {
            student_count: rows.len(),
            mean_gpa,
            below_warning,
            rows,
        }
    }
}

/// CSV exporter for cohort summaries
pub struct CsvSummaryExporter;

impl SummaryExporter for CsvSummaryExporter {
    fn export(
        &self,
        university: &University,
        options: &SummaryOptions,
        output_path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        let summary = CohortSummary::build(university, options);
        export_summary_csv_with(university, &summary, output_path)
    }
}

/// Quote a field when it holds a comma, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write a precomputed cohort summary as CSV
///
/// The layout mirrors the records file: metadata rows, then a titled section
/// with a header line.
///
/// # Errors
/// Returns an error if file writing fails
pub fn export_summary_csv_with(
    university: &University,
    summary: &CohortSummary,
    output_path: &Path,
) -> Result<(), Box<dyn Error>> {
    use std::fs::File;
    use std::io::{BufWriter, Write};

    let mut file = BufWriter::new(File::create(output_path)?);

    writeln!(file, "Institution,{}", csv_field(&university.name))?;
    writeln!(file, "Academic Year,{}", csv_field(&university.academic_year))?;
    writeln!(file, "Student Count,{}", summary.student_count)?;
    writeln!(file, "Mean GPA,{:.2}", summary.mean_gpa)?;
    writeln!(file, "Below Attendance Warning,{}", summary.below_warning)?;
    writeln!(file)?;

    writeln!(file, "Students")?;
    writeln!(
        file,
        "Enrollment Number,Name,Programme,Semester,Semester GPA,Cumulative GPA,Attendance %,Attendance Band,Internship Credits,Fee Balance"
    )?;

    logger::debug!("Exporting {} student rows", summary.rows.len());

    for row in &summary.rows {
        writeln!(
            file,
            "{},{},{},{},{:.2},{:.2},{:.2},{},{},{:.2}",
            csv_field(&row.enrollment),
            csv_field(&row.name),
            csv_field(&row.programme),
            row.semester,
            row.semester_gpa,
            row.cumulative_gpa,
            row.attendance,
            row.band,
            row.internship_credits,
            row.fee_balance
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Convenience function to export summaries using the CSV exporter
///
/// Returns the computed cohort summary for further use
///
/// # Errors
/// Returns an error if file writing fails
pub fn export_summary_csv<P: AsRef<Path>>(
    university: &University,
    options: &SummaryOptions,
    output_path: P,
) -> Result<CohortSummary, Box<dyn Error>> {
    let summary = CohortSummary::build(university, options);
    export_summary_csv_with(university, &summary, output_path.as_ref())?;
    Ok(summary)
}
