//! HTML report generator
//!
//! Generates a self-contained HTML page (embedded CSS, no scripts) from the
//! `student_report.html` askama template. Values are HTML-escaped by askama.

use crate::core::academics::{AttendanceBand, ResultStatus};
use crate::core::models::NotificationKind;
use crate::core::report::{money, ReportContext, ReportError, ReportGenerator};
use askama::Template;
use std::fs;
use std::path::Path;

struct GradeRow {
    code: String,
    name: String,
    credits: u32,
    internal: String,
    external: String,
    total: String,
    letter: String,
    points: String,
    status: String,
    status_class: &'static str,
}

struct AttendanceRow {
    code: String,
    name: String,
    present: u32,
    total: u32,
    percentage: String,
    band: String,
    band_class: &'static str,
}

struct InternshipRow {
    company: String,
    position: String,
    start: String,
    end: String,
    months: u32,
    credits: u32,
    status: String,
}

struct FeeRow {
    label: &'static str,
    amount: String,
}

struct PaymentRow {
    date: String,
    receipt: String,
    method: String,
    amount: String,
    status: String,
}

struct NotificationRow {
    title: String,
    content: String,
    kind: String,
    kind_class: &'static str,
    date: String,
}

/// View model for the HTML template
#[derive(Template)]
#[template(path = "student_report.html")]
struct StudentReportPage {
    title: String,
    student_name: String,
    enrollment: String,
    programme: String,
    semester: u32,
    status: String,
    institution: String,
    academic_year: String,
    email: String,
    semester_gpa: String,
    cumulative_gpa: String,
    attendance_pct: String,
    attendance_label: String,
    attendance_class: &'static str,
    internship_total: u32,
    internship_verified: u32,
    fee_balance: String,
    report_semester: u32,
    grades: Vec<GradeRow>,
    attendance: Vec<AttendanceRow>,
    internships: Vec<InternshipRow>,
    fee_heading: String,
    fee_rows: Vec<FeeRow>,
    payments: Vec<PaymentRow>,
    notifications: Vec<NotificationRow>,
    generated: String,
}

const fn band_class(band: AttendanceBand) -> &'static str {
    match band {
        AttendanceBand::Good => "band-good",
        AttendanceBand::Warning => "band-warning",
        AttendanceBand::Critical => "band-critical",
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

impl StudentReportPage {
    fn from_context(ctx: &ReportContext) -> Self {
        let summary = ctx.summary;
        let student = summary.student;
        let fees = &summary.fees;

        let grades = summary
            .grades
            .iter()
            .map(|g| GradeRow {
                code: g.subject_code.clone(),
                name: g.subject_name.clone(),
                credits: g.credits,
                internal: optional(g.internal),
                external: optional(g.external),
                total: optional(g.total),
                letter: g.letter.map_or_else(|| "-".to_string(), |l| l.to_string()),
                points: optional(g.grade_points),
                status: g.status.to_string(),
                status_class: match g.status {
                    ResultStatus::Pass => "status-pass",
                    ResultStatus::Fail => "status-fail",
                    ResultStatus::Pending => "status-pending",
                },
            })
            .collect();

        let attendance = summary
            .attendance
            .subjects
            .iter()
            .map(|s| AttendanceRow {
                code: s.subject_code.clone(),
                name: s.subject_name.clone(),
                present: s.present,
                total: s.total,
                percentage: format!("{:.2}", s.percentage),
                band: s.band.to_string(),
                band_class: band_class(s.band),
            })
            .collect();

        let internships = summary
            .internships
            .iter()
            .map(|i| InternshipRow {
                company: i.company.clone(),
                position: i.position.clone(),
                start: i.start.to_string(),
                end: i.end.to_string(),
                months: i.duration_months(),
                credits: i.credits_earned,
                status: i.status.to_string(),
            })
            .collect();

        let (fee_heading, fee_rows) = fees.structure.map_or_else(
            || (String::new(), Vec::new()),
            |s| {
                let rows = vec![
                    FeeRow { label: "Tuition", amount: money(s.tuition) },
                    FeeRow { label: "Library", amount: money(s.library) },
                    FeeRow { label: "Lab", amount: money(s.lab) },
                    FeeRow { label: "Other", amount: money(s.other) },
                    FeeRow { label: "Total due", amount: money(fees.total_due) },
                    FeeRow { label: "Paid", amount: money(fees.paid) },
                    FeeRow { label: "Balance", amount: money(fees.balance) },
                ];
                (format!("Semester {} ({})", s.semester, s.academic_year), rows)
            },
        );

        let payments = fees
            .payments
            .iter()
            .map(|p| PaymentRow {
                date: p.date.to_string(),
                receipt: p.receipt_number.clone(),
                method: p.method.to_string(),
                amount: money(p.amount),
                status: p.status.to_string(),
            })
            .collect();

        let notifications = summary
            .notifications
            .iter()
            .map(|n| NotificationRow {
                title: n.title.clone(),
                content: n.content.clone(),
                kind: n.kind.to_string(),
                kind_class: if n.kind == NotificationKind::Alert {
                    "alert"
                } else {
                    ""
                },
                date: n.created.to_string(),
            })
            .collect();

        Self {
            title: format!("{} - Student Report", ctx.student_name()),
            student_name: ctx.student_name(),
            enrollment: student.enrollment_number.clone(),
            programme: summary.programme.clone(),
            semester: student.semester,
            status: student.status.to_string(),
            institution: ctx.institution().to_string(),
            academic_year: ctx.academic_year().to_string(),
            email: student.email.clone().unwrap_or_else(|| "-".to_string()),
            semester_gpa: format!("{:.2}", summary.semester_gpa),
            cumulative_gpa: format!("{:.2}", summary.cumulative_gpa),
            attendance_pct: format!("{:.2}", summary.attendance.percentage),
            attendance_label: summary.attendance.band.to_string(),
            attendance_class: band_class(summary.attendance.band),
            internship_total: summary.internship_credits.total,
            internship_verified: summary.internship_credits.verified,
            fee_balance: money(fees.balance),
            report_semester: summary.semester,
            grades,
            attendance,
            internships,
            fee_heading,
            fee_rows,
            payments,
            notifications,
            generated: ctx.generated.to_string(),
        }
    }
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        Ok(StudentReportPage::from_context(ctx).render()?)
    }
}
