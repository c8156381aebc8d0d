//! Markdown report generator
//!
//! Generates student reports in Markdown. These render well in GitHub, GitLab
//! and VS Code.

use crate::core::academics::{AttendanceBand, ResultStatus};
use crate::core::report::{money, ReportContext, ReportError, ReportGenerator};
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let summary = ctx.summary;
        let student = summary.student;
        let mut output = MARKDOWN_TEMPLATE.to_string();

        // Header and profile
        output = output.replace("{{student_name}}", &ctx.student_name());
        output = output.replace("{{institution}}", ctx.institution());
        output = output.replace("{{academic_year}}", ctx.academic_year());
        output = output.replace("{{generated}}", &ctx.generated.to_string());
        output = output.replace("{{enrollment}}", &student.enrollment_number);
        output = output.replace("{{programme}}", &summary.programme);
        output = output.replace("{{semester}}", &student.semester.to_string());
        output = output.replace("{{status}}", &student.status.to_string());
        output = output.replace("{{email}}", student.email.as_deref().unwrap_or("-"));

        // Quick stats
        output = output.replace("{{semester_gpa}}", &format!("{:.2}", summary.semester_gpa));
        output = output.replace(
            "{{cumulative_gpa}}",
            &format!("{:.2}", summary.cumulative_gpa),
        );
        output = output.replace(
            "{{attendance}}",
            &format!(
                "{} {:.2}% ({})",
                Self::band_marker(summary.attendance.band),
                summary.attendance.percentage,
                summary.attendance.band
            ),
        );
        output = output.replace(
            "{{internship_credits}}",
            &format!(
                "{} ({} verified)",
                summary.internship_credits.total, summary.internship_credits.verified
            ),
        );
        output = output.replace("{{fee_balance}}", &money(summary.fees.balance));

        output = output.replace("{{report_semester}}", &summary.semester.to_string());
        output = output.replace("{{grades_table}}", &Self::grades_table(ctx));
        output = output.replace("{{attendance_table}}", &Self::attendance_table(ctx));
        output = output.replace("{{internships_table}}", &Self::internships_table(ctx));
        output = output.replace("{{fee_breakdown}}", &Self::fee_breakdown(ctx));
        output = output.replace("{{payments_table}}", &Self::payments_table(ctx));
        output = output.replace("{{notifications}}", &Self::notifications(ctx));

        output = output.replace("{{good_threshold}}", &summary.policy.good.to_string());
        output = output.replace("{{warning_threshold}}", &summary.policy.warning.to_string());

        output
    }

    const fn band_marker(band: AttendanceBand) -> &'static str {
        match band {
            AttendanceBand::Good => "🟢",
            AttendanceBand::Warning => "🟡",
            AttendanceBand::Critical => "🔴",
        }
    }

    fn grades_table(ctx: &ReportContext) -> String {
        let grades = &ctx.summary.grades;
        if grades.is_empty() {
            return "_No grades recorded for this semester._".to_string();
        }

        let mut table = String::new();
        table.push_str("| Subject | Name | Credits | Internal | External | Total | Grade | Points | Status |\n");
        table.push_str("|---|---|---|---|---|---|---|---|---|\n");

        let opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        for g in grades {
            let status = match g.status {
                ResultStatus::Pass => "✅ Pass",
                ResultStatus::Fail => "❌ Fail",
                ResultStatus::Pending => "⏳ Pending",
            };
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {status} |",
                g.subject_code,
                g.subject_name,
                g.credits,
                opt(g.internal),
                opt(g.external),
                opt(g.total),
                g.letter.map_or_else(|| "-".to_string(), |l| l.to_string()),
                opt(g.grade_points),
            );
        }
        table
    }

    fn attendance_table(ctx: &ReportContext) -> String {
        let attendance = &ctx.summary.attendance;
        if attendance.subjects.is_empty() {
            return "_No attendance recorded._".to_string();
        }

        let mut table = String::new();
        table.push_str("| Subject | Name | Present | Total | Percentage | Band |\n");
        table.push_str("|---|---|---|---|---|---|\n");
        for s in &attendance.subjects {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {:.2}% | {} {} |",
                s.subject_code,
                s.subject_name,
                s.present,
                s.total,
                s.percentage,
                Self::band_marker(s.band),
                s.band
            );
        }
        let _ = writeln!(
            table,
            "| **Overall** | | **{}** | **{}** | **{:.2}%** | {} {} |",
            attendance.present,
            attendance.total,
            attendance.percentage,
            Self::band_marker(attendance.band),
            attendance.band
        );
        table
    }

    fn internships_table(ctx: &ReportContext) -> String {
        let internships = &ctx.summary.internships;
        if internships.is_empty() {
            return "_No internships recorded._".to_string();
        }

        let mut table = String::new();
        table.push_str("| Company | Position | From | To | Months | Credits | Status |\n");
        table.push_str("|---|---|---|---|---|---|---|\n");
        for i in internships {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} | {} |",
                i.company,
                i.position,
                i.start,
                i.end,
                i.duration_months(),
                i.credits_earned,
                i.status
            );
        }
        let credits = ctx.summary.internship_credits;
        let _ = write!(
            table,
            "\n**Total credits:** {} ({} verified)\n",
            credits.total, credits.verified
        );
        table
    }

    fn fee_breakdown(ctx: &ReportContext) -> String {
        let fees = &ctx.summary.fees;
        let Some(structure) = fees.structure else {
            return "_No fee structure on record for this semester._".to_string();
        };

        let mut table = String::new();
        let _ = writeln!(
            table,
            "Semester {} ({})\n",
            structure.semester, structure.academic_year
        );
        table.push_str("| Component | Amount |\n|---|---|\n");
        for (name, amount) in [
            ("Tuition", structure.tuition),
            ("Library", structure.library),
            ("Lab", structure.lab),
            ("Other", structure.other),
        ] {
            let _ = writeln!(table, "| {name} | {} |", money(amount));
        }
        let _ = writeln!(table, "| **Total due** | **{}** |", money(fees.total_due));
        let _ = writeln!(table, "| Paid | {} |", money(fees.paid));
        let _ = writeln!(table, "| **Balance** | **{}** |", money(fees.balance));
        table
    }

    fn payments_table(ctx: &ReportContext) -> String {
        let payments = &ctx.summary.fees.payments;
        if payments.is_empty() {
            return "_No payments recorded._".to_string();
        }

        let mut table = String::new();
        table.push_str("| Date | Receipt | Method | Amount | Status |\n|---|---|---|---|---|\n");
        for p in payments {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} |",
                p.date,
                p.receipt_number,
                p.method,
                money(p.amount),
                p.status
            );
        }
        table
    }

    fn notifications(ctx: &ReportContext) -> String {
        let notifications = &ctx.summary.notifications;
        if notifications.is_empty() {
            return "_No active notifications._".to_string();
        }

        let mut list = String::new();
        for n in notifications {
            let _ = writeln!(
                list,
                "- **{}** ({}, {}): {}",
                n.title, n.kind, n.created, n.content
            );
        }
        list
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ReportError> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, ReportError> {
        Ok(self.render_template(ctx))
    }
}
