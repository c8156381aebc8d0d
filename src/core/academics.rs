//! Academic computations: GPA, attendance, grade conversion, credits and fees
//!
//! Every figure produced here is rounded with [`round2`] so that reports,
//! exports and the CLI agree to the last digit.

use crate::core::models::{
    FeePayment, FeeStructure, GradeRecord, Internship, InternshipStatus, Notification, Student,
    Subject, University,
};
use std::collections::BTreeMap;
use std::fmt;

/// Round to 2 decimal places, halves away from zero
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted grade point average
///
/// GPA = Σ(points × credits) / Σ(credits), rounded to 2 decimals.
/// Returns exactly `0.0` when the credit sum is zero (including no entries).
///
/// # Arguments
/// * `entries` - `(grade_points, credits)` pairs
#[must_use]
pub fn gpa<I>(entries: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (weighted, credits) = entries
        .into_iter()
        .fold((0.0, 0.0), |(w, c), (points, credits)| {
            (points.mul_add(credits, w), c + credits)
        });

    if credits == 0.0 {
        return 0.0;
    }
    round2(weighted / credits)
}

/// Attendance percentage
///
/// Percentage = present / total × 100, rounded to 2 decimals. Returns exactly
/// `0.0` when `total` is zero. `present` is clamped to `total`, so the result
/// always lies in [0, 100].
#[must_use]
pub fn attendance_percentage(present: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let present = present.min(total);
    round2(f64::from(present) / f64::from(total) * 100.0)
}

/// Letter grade from the conversion table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LetterGrade {
    /// 90-100
    APlus,
    /// 80-89
    A,
    /// 70-79
    BPlus,
    /// 60-69
    B,
    /// 50-59
    C,
    /// 0-49
    F,
}

impl LetterGrade {
    /// Grade points awarded for this letter
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::APlus => 10.0,
            Self::A => 9.0,
            Self::BPlus => 8.0,
            Self::B => 7.0,
            Self::C => 6.0,
            Self::F => 0.0,
        }
    }

    /// Whether the subject is passed with this letter
    #[must_use]
    pub const fn is_pass(self) -> bool {
        !matches!(self, Self::F)
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::C => "C",
            Self::F => "F",
        };
        f.write_str(s)
    }
}

/// Convert a marks percentage to a letter grade
///
/// Bands are taken on the integer floor of the percentage, so 89.99 is an A
/// and 90.0 an A+. Values outside [0, 100] are clamped.
#[must_use]
pub fn grade_for_percentage(percentage: f64) -> LetterGrade {
    let band = percentage.clamp(0.0, 100.0).floor();
    if band >= 90.0 {
        LetterGrade::APlus
    } else if band >= 80.0 {
        LetterGrade::A
    } else if band >= 70.0 {
        LetterGrade::BPlus
    } else if band >= 60.0 {
        LetterGrade::B
    } else if band >= 50.0 {
        LetterGrade::C
    } else {
        LetterGrade::F
    }
}

/// Outcome of a graded subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    /// Passed
    Pass,
    /// Failed (grade F or zero grade points)
    Fail,
    /// Marks not fully entered
    Pending,
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail => write!(f, "Fail"),
            Self::Pending => write!(f, "Pending"),
        }
    }
}

/// A grade record resolved against its subject
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedGrade {
    /// Subject code
    pub subject_code: String,
    /// Subject name
    pub subject_name: String,
    /// Subject credits
    pub credits: u32,
    /// Internal marks, if entered
    pub internal: Option<f64>,
    /// External marks, if entered
    pub external: Option<f64>,
    /// Total marks, if both parts are entered
    pub total: Option<f64>,
    /// Percentage of the subject's maximum, if computable
    pub percentage: Option<f64>,
    /// Letter grade, if computable
    pub letter: Option<LetterGrade>,
    /// Grade points used for GPA; `None` while pending
    pub grade_points: Option<f64>,
    /// Pass / Fail / Pending
    pub status: ResultStatus,
}

/// Resolve a grade record against its subject
///
/// Explicit grade points win over the conversion table. Without them the
/// record is pending until both internal and external marks are entered.
#[must_use]
pub fn evaluate_grade(record: &GradeRecord, subject: &Subject) -> EvaluatedGrade {
    let total = record.total_marks();
    let max = subject.max_total();
    let raw_percentage = total.filter(|_| max > 0.0).map(|t| t / max * 100.0);
    let letter = raw_percentage.map(grade_for_percentage);
    let percentage = raw_percentage.map(round2);

    let grade_points = record.grade_points.or_else(|| letter.map(LetterGrade::points));
    let status = match (record.grade_points, letter) {
        (Some(points), _) if points <= 0.0 => ResultStatus::Fail,
        (Some(_), _) => ResultStatus::Pass,
        (None, Some(l)) if l.is_pass() => ResultStatus::Pass,
        (None, Some(_)) => ResultStatus::Fail,
        (None, None) => ResultStatus::Pending,
    };

    EvaluatedGrade {
        subject_code: subject.code.clone(),
        subject_name: subject.name.clone(),
        credits: subject.credits,
        internal: record.internal_marks.map(round2),
        external: record.external_marks.map(round2),
        total: total.map(round2),
        percentage,
        letter,
        grade_points,
        status,
    }
}

/// Evaluated grades for a student, optionally restricted to one semester
///
/// Records whose subject is unknown are skipped with a warning.
#[must_use]
pub fn evaluated_grades(
    university: &University,
    student: &Student,
    semester: Option<u32>,
) -> Vec<EvaluatedGrade> {
    let mut grades: Vec<_> = university
        .grades_for(student.id)
        .filter(|g| semester.is_none_or(|s| g.semester == s))
        .filter_map(|g| {
            let subject = university.get_subject(g.subject_id);
            if subject.is_none() {
                logger::warn!(
                    "Grade for {} references unknown subject {}",
                    student.enrollment_number,
                    g.subject_id
                );
            }
            subject.map(|s| evaluate_grade(g, s))
        })
        .collect();
    grades.sort_by(|a, b| a.subject_code.cmp(&b.subject_code));
    grades
}

fn gpa_of(grades: &[EvaluatedGrade]) -> f64 {
    gpa(grades
        .iter()
        .filter_map(|g| g.grade_points.map(|p| (p, f64::from(g.credits)))))
}

/// GPA for one semester; pending grades are excluded
#[must_use]
pub fn semester_gpa(university: &University, student: &Student, semester: u32) -> f64 {
    gpa_of(&evaluated_grades(university, student, Some(semester)))
}

/// GPA over every graded semester; pending grades are excluded
#[must_use]
pub fn cumulative_gpa(university: &University, student: &Student) -> f64 {
    gpa_of(&evaluated_grades(university, student, None))
}

/// Attendance thresholds separating the Good / Warning / Critical bands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttendancePolicy {
    /// Strictly above this is Good
    pub good: f64,
    /// At or above this (and not Good) is Warning; below is Critical
    pub warning: f64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            good: 75.0,
            warning: 65.0,
        }
    }
}

impl AttendancePolicy {
    /// Classify a percentage
    #[must_use]
    pub fn band(&self, percentage: f64) -> AttendanceBand {
        if percentage > self.good {
            AttendanceBand::Good
        } else if percentage >= self.warning {
            AttendanceBand::Warning
        } else {
            AttendanceBand::Critical
        }
    }
}

/// Colour-coded attendance standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceBand {
    /// Green
    Good,
    /// Yellow
    Warning,
    /// Red
    Critical,
}

impl AttendanceBand {
    /// Colour name used by reports
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Warning => "yellow",
            Self::Critical => "red",
        }
    }
}

impl fmt::Display for AttendanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Attendance for one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAttendance {
    /// Subject code
    pub subject_code: String,
    /// Subject name
    pub subject_name: String,
    /// Sessions marked Present
    pub present: u32,
    /// Sessions recorded
    pub total: u32,
    /// Rounded percentage
    pub percentage: f64,
    /// Band under the policy in force
    pub band: AttendanceBand,
}

/// Attendance across all subjects for one student
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    /// Per-subject rows ordered by subject code
    pub subjects: Vec<SubjectAttendance>,
    /// Sessions marked Present across all subjects
    pub present: u32,
    /// Sessions recorded across all subjects
    pub total: u32,
    /// Overall percentage
    pub percentage: f64,
    /// Overall band
    pub band: AttendanceBand,
}

/// Summarise a student's attendance per subject and overall
///
/// Only `Present` marks count as attended; `Late` and `Absent` only add to the total.
#[must_use]
pub fn attendance_summary(
    university: &University,
    student: &Student,
    policy: &AttendancePolicy,
) -> AttendanceSummary {
    let mut counts: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for record in university.attendance_for(student.id) {
        let entry = counts.entry(record.subject_id).or_default();
        entry.1 += 1;
        if record.status.is_attended() {
            entry.0 += 1;
        }
    }

    let mut subjects: Vec<SubjectAttendance> = counts
        .into_iter()
        .map(|(subject_id, (present, total))| {
            let (code, name) = university.get_subject(subject_id).map_or_else(
                || (format!("#{subject_id}"), String::from("Unknown subject")),
                |s| (s.code.clone(), s.name.clone()),
            );
            let percentage = attendance_percentage(present, total);
            SubjectAttendance {
                subject_code: code,
                subject_name: name,
                present,
                total,
                percentage,
                band: policy.band(percentage),
            }
        })
        .collect();
    subjects.sort_by(|a, b| a.subject_code.cmp(&b.subject_code));

    let present = subjects.iter().map(|s| s.present).sum();
    let total = subjects.iter().map(|s| s.total).sum();
    let percentage = attendance_percentage(present, total);

    AttendanceSummary {
        subjects,
        present,
        total,
        percentage,
        band: policy.band(percentage),
    }
}

/// Internship credit totals for one student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InternshipCredits {
    /// Credits over every internship on record
    pub total: u32,
    /// Credits over verified internships only
    pub verified: u32,
}

/// Sum internship credits
#[must_use]
pub fn internship_credits(internships: &[&Internship]) -> InternshipCredits {
    internships
        .iter()
        .fold(InternshipCredits::default(), |acc, i| InternshipCredits {
            total: acc.total.saturating_add(i.credits_earned),
            verified: if i.status == InternshipStatus::Verified {
                acc.verified.saturating_add(i.credits_earned)
            } else {
                acc.verified
            },
        })
}

/// Fee position for one student's current semester
#[derive(Debug, Clone, PartialEq)]
pub struct FeeStatus<'a> {
    /// Fee structure in force, if any
    pub structure: Option<&'a FeeStructure>,
    /// Payments by the student, newest first
    pub payments: Vec<&'a FeePayment>,
    /// Total due under the structure (0 without one)
    pub total_due: f64,
    /// Sum of the student's completed payments
    pub paid: f64,
    /// `total_due - paid`; 0 without a structure
    pub balance: f64,
}

/// Compute the fee position of a student
///
/// Every `Completed` payment by the student reduces the balance, whichever
/// structure it was recorded against. Without a structure the balance is 0.
#[must_use]
pub fn fee_status<'a>(university: &'a University, student: &Student) -> FeeStatus<'a> {
    let structure = university.current_fee_structure(student);
    let payments = university.payments_for(student.id);

    let Some(current) = structure else {
        return FeeStatus {
            structure: None,
            payments,
            total_due: 0.0,
            paid: 0.0,
            balance: 0.0,
        };
    };

    let total_due = round2(current.total());
    let paid = round2(
        payments
            .iter()
            .filter(|p| p.is_settled())
            .map(|p| p.amount)
            .sum(),
    );

    FeeStatus {
        structure,
        payments,
        total_due,
        paid,
        balance: round2(total_due - paid),
    }
}

/// Notifications shown on the student dashboard
///
/// Active notices addressed to All or Students, newest first, at most `limit`.
#[must_use]
pub fn dashboard_notifications(university: &University, limit: usize) -> Vec<&Notification> {
    let mut visible: Vec<_> = university
        .notifications()
        .iter()
        .filter(|n| n.active && n.audience.reaches_students())
        .collect();
    // Stable sort keeps insertion order for notices posted the same day
    visible.sort_by(|a, b| b.created.cmp(&a.created));
    visible.truncate(limit);
    visible
}

/// Everything the dashboard shows for one student and semester
#[derive(Debug, Clone)]
pub struct StudentSummary<'a> {
    /// The student
    pub student: &'a Student,
    /// Programme name, or the raw id when unknown
    pub programme: String,
    /// Semester the figures refer to
    pub semester: u32,
    /// Grades for `semester`
    pub grades: Vec<EvaluatedGrade>,
    /// GPA for `semester`
    pub semester_gpa: f64,
    /// GPA over all semesters
    pub cumulative_gpa: f64,
    /// Attendance across subjects
    pub attendance: AttendanceSummary,
    /// Bands the attendance was classified with
    pub policy: AttendancePolicy,
    /// Internships, newest first
    pub internships: Vec<&'a Internship>,
    /// Internship credit totals
    pub internship_credits: InternshipCredits,
    /// Fee position
    pub fees: FeeStatus<'a>,
    /// Dashboard notifications
    pub notifications: Vec<&'a Notification>,
}

/// Options controlling how a summary is built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    /// Semester to report; `None` means the student's current semester
    pub semester: Option<u32>,
    /// Attendance bands
    pub policy: AttendancePolicy,
    /// Maximum notifications to include
    pub notification_limit: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            semester: None,
            policy: AttendancePolicy::default(),
            notification_limit: 5,
        }
    }
}

impl<'a> StudentSummary<'a> {
    /// Build the summary for one student
    #[must_use]
    pub fn build(
        university: &'a University,
        student: &'a Student,
        options: &SummaryOptions,
    ) -> Self {
        let semester = options.semester.unwrap_or(student.semester);
        let programme = university
            .get_programme(student.programme_id)
            .map_or_else(|| format!("#{}", student.programme_id), |p| p.name.clone());

        let grades = evaluated_grades(university, student, Some(semester));
        let semester_gpa = gpa_of(&grades);
        let cumulative_gpa = cumulative_gpa(university, student);
        let attendance = attendance_summary(university, student, &options.policy);
        let internships = university.internships_for(student.id);
        let internship_credits = internship_credits(&internships);
        let fees = fee_status(university, student);
        let notifications = dashboard_notifications(university, options.notification_limit);

        logger::debug!(
            "Summary for {}: semester {semester} GPA {semester_gpa:.2}, attendance {:.2}%",
            student.enrollment_number,
            attendance.percentage
        );

        Self {
            student,
            programme,
            semester,
            grades,
            semester_gpa,
            cumulative_gpa,
            attendance,
            policy: options.policy,
            internships,
            internship_credits,
            fees,
            notifications,
        }
    }
}
