//! Report command handler
//!
//! Generates student reports in various formats (Markdown, HTML, PDF).

use logger::{error, info};
use unihub::config::Config;
use unihub::core::{
    academics::{AttendanceBand, StudentSummary},
    models::University,
    records::parse_records_csv,
    report::{
        HtmlReporter, MarkdownReporter, PdfReporter, ReportContext, ReportError, ReportFormat,
        ReportGenerator,
    },
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Arguments of a single `report` invocation
pub struct ReportRequest<'a> {
    /// Records file
    pub input_file: &'a Path,
    /// Enrollment number
    pub student: &'a str,
    /// Explicit output path
    pub output_file: Option<&'a Path>,
    /// Format name (markdown, html, pdf)
    pub format: &'a str,
    /// Semester to report
    pub semester: Option<u32>,
    /// Browser used for PDF conversion
    pub pdf_converter: Option<&'a str>,
}

/// Run the report command.
pub fn run(request: &ReportRequest, config: &Config) {
    if let Err(err) = generate_report(request, config) {
        error!(
            "Report generation failed for {}: {err}",
            request.input_file.display()
        );
        eprintln!("{err}");
    }
}

fn reporter_for(format: ReportFormat, pdf_converter: Option<&str>) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Pdf => Box::new(
            pdf_converter.map_or_else(PdfReporter::new, PdfReporter::with_converter),
        ),
    }
}

fn parse_format(format_str: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))
}

fn load(input_file: &Path) -> Result<University, String> {
    let university = parse_records_csv(input_file).map_err(|e| {
        error!("Failed to load records {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;
    info!("Records loaded: {}", input_file.display());
    Ok(university)
}

fn reports_dir(config: &Config) -> Result<PathBuf, String> {
    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;
    Ok(reports_dir)
}

/// Where a report goes: an explicit file, or `<dir>/<enrollment>_report.<ext>`
enum OutputTarget {
    File(PathBuf),
    Dir(PathBuf, ReportFormat),
}

/// Write one student's report with `reporter`
fn write_report(
    university: &University,
    summary: &StudentSummary,
    reporter: &dyn ReportGenerator,
    output: OutputTarget,
) -> Result<PathBuf, ReportError> {
    let ctx = ReportContext::new(university, summary);
    let path = match output {
        OutputTarget::File(path) => path,
        OutputTarget::Dir(dir, format) => {
            dir.join(format!("{}.{}", ctx.file_stem(), format.extension()))
        }
    };
    reporter.generate(&ctx, &path)?;
    Ok(path)
}

/// Print a summary of the report
fn print_summary(summary: &StudentSummary) {
    let student = summary.student;
    println!("\n=== Summary ===");
    println!(
        "Student: {} ({})",
        student.full_name(),
        student.enrollment_number
    );
    println!("Programme: {}", summary.programme);
    println!(
        "Semester {} GPA: {:.2}  Cumulative GPA: {:.2}",
        summary.semester, summary.semester_gpa, summary.cumulative_gpa
    );
    println!(
        "Attendance: {:.2}% ({})",
        summary.attendance.percentage, summary.attendance.band
    );
    println!("Fee balance: {:.2}", summary.fees.balance);

    if summary.attendance.total > 0 && summary.attendance.band != AttendanceBand::Good {
        println!(
            "⚠️  Attendance is not above the {}% threshold",
            summary.policy.good
        );
    }
}

fn generate_report(request: &ReportRequest, config: &Config) -> Result<(), String> {
    let format = parse_format(request.format)?;
    let university = load(request.input_file)?;

    let student = university.find_student(request.student).ok_or_else(|| {
        format!(
            "✗ {}",
            ReportError::UnknownStudent(request.student.to_string())
        )
    })?;

    let target = match request.output_file {
        Some(output) => OutputTarget::File(output.to_path_buf()),
        None => OutputTarget::Dir(reports_dir(config)?, format),
    };

    let summary = StudentSummary::build(
        &university,
        student,
        &config.summary_options(request.semester),
    );
    let reporter = reporter_for(format, request.pdf_converter);
    let path = write_report(&university, &summary, reporter.as_ref(), target)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    println!("✓ Report generated: {}", path.display());
    info!("Report exported to: {}", path.display());

    print_summary(&summary);

    Ok(())
}

/// Write one report per student for every records file
///
/// This is called when `--report` is passed to the summary command.
pub fn run_for_all(
    input_files: &[PathBuf],
    format_str: &str,
    semester: Option<u32>,
    config: &Config,
) {
    let result = parse_format(format_str).and_then(|format| {
        let dir = reports_dir(config)?;
        Ok((format, dir))
    });
    let (format, dir) = match result {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let reporter = reporter_for(format, None);
    let options = config.summary_options(semester);

    for input_file in input_files {
        let university = match load(input_file) {
            Ok(university) => university,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        for student in university.students() {
            let summary = StudentSummary::build(&university, student, &options);
            match write_report(
                &university,
                &summary,
                reporter.as_ref(),
                OutputTarget::Dir(dir.clone(), format),
            ) {
                Ok(path) => println!("✓ Report generated: {}", path.display()),
                Err(e) => {
                    error!("Report failed for {}: {e}", student.enrollment_number);
                    eprintln!("✗ Report failed for {}: {e}", student.enrollment_number);
                }
            }
        }
    }
}
