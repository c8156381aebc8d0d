//! Integration tests for GPA, attendance, internship and fee calculations

use unihub::core::academics::{
    cumulative_gpa, dashboard_notifications, semester_gpa, AttendanceBand, AttendancePolicy,
    LetterGrade, ResultStatus, StudentSummary, SummaryOptions,
};
use unihub::core::models::University;
use unihub::core::records::{parse_records_csv, parse_records_str};

fn sample() -> University {
    parse_records_csv("samples/records/sample_university.csv").expect("parse sample records")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_semester_and_cumulative_gpa() {
    let university = sample();
    let asha = university.find_student("EN2023001").unwrap();

    // (10*4 + 9*3 + 8*3) / 10; the Discrete Mathematics grade is still pending
    assert_close(semester_gpa(&university, asha, 3), 9.1);
    // Semester 2 adds 7 points over 4 credits: 119 / 14
    assert_close(cumulative_gpa(&university, asha), 8.5);
    assert_close(semester_gpa(&university, asha, 2), 7.0);
    assert_close(semester_gpa(&university, asha, 5), 0.0);

    let ravi = university.find_student("EN2023002").unwrap();
    assert_close(semester_gpa(&university, ravi, 3), 3.43);
}

#[test]
fn test_summary_for_asha() {
    let university = sample();
    let asha = university.find_student("EN2023001").unwrap();
    let summary = StudentSummary::build(&university, asha, &SummaryOptions::default());

    assert_eq!(summary.programme, "B.Tech Computer Science");
    assert_eq!(summary.semester, 3);

    let codes: Vec<_> = summary.grades.iter().map(|g| g.subject_code.as_str()).collect();
    assert_eq!(codes, ["CS301", "CS302", "CS303", "MA301"]);
    assert_eq!(summary.grades[0].letter, Some(LetterGrade::APlus));
    assert_eq!(summary.grades[2].letter, Some(LetterGrade::BPlus));
    assert_eq!(summary.grades[3].status, ResultStatus::Pending);
    assert!(summary.grades[3].grade_points.is_none());

    // Late marks count toward the total but not as attended
    let attendance = &summary.attendance;
    assert_eq!(attendance.present, 7);
    assert_eq!(attendance.total, 8);
    assert_close(attendance.percentage, 87.5);
    assert_eq!(attendance.band, AttendanceBand::Good);
    assert_eq!(attendance.subjects[0].subject_code, "CS301");
    assert_close(attendance.subjects[0].percentage, 75.0);
    assert_eq!(attendance.subjects[0].band, AttendanceBand::Warning);

    assert_eq!(summary.internship_credits.total, 6);
    assert_eq!(summary.internship_credits.verified, 4);

    // The pending payment does not count
    let fees = &summary.fees;
    assert_eq!(fees.structure.map(|s| s.id), Some(1));
    assert_close(fees.total_due, 58_500.0);
    assert_close(fees.paid, 30_000.0);
    assert_close(fees.balance, 28_500.0);
    assert_eq!(fees.payments.len(), 2);
}

#[test]
fn test_summary_for_other_students() {
    let university = sample();
    let options = SummaryOptions::default();

    let ravi = university.find_student("EN2023002").unwrap();
    let summary = StudentSummary::build(&university, ravi, &options);
    assert_eq!(summary.attendance.band, AttendanceBand::Critical);
    assert_close(summary.attendance.percentage, 25.0);
    assert_eq!(summary.grades[1].status, ResultStatus::Fail);
    assert_close(summary.fees.balance, 0.0);

    let meera = university.find_student("EN2024001").unwrap();
    let summary = StudentSummary::build(&university, meera, &options);
    assert_close(summary.attendance.percentage, 66.67);
    assert_eq!(summary.attendance.band, AttendanceBand::Warning);
    assert_close(summary.fees.balance, 80_000.0);
    assert_close(summary.semester_gpa, 0.0);

    // No fee structure for semester 8
    let arjun = university.find_student("EN2019007").unwrap();
    let summary = StudentSummary::build(&university, arjun, &options);
    assert!(summary.fees.structure.is_none());
    assert_close(summary.fees.balance, 0.0);
    assert_eq!(summary.attendance.total, 0);
    assert_close(summary.attendance.percentage, 0.0);
}

#[test]
fn test_custom_policy_and_semester() {
    let university = sample();
    let asha = university.find_student("EN2023001").unwrap();
    let options = SummaryOptions {
        semester: Some(2),
        policy: AttendancePolicy {
            good: 90.0,
            warning: 80.0,
        },
        notification_limit: 1,
    };
    let summary = StudentSummary::build(&university, asha, &options);

    assert_eq!(summary.semester, 2);
    assert_eq!(summary.grades.len(), 1);
    assert_close(summary.semester_gpa, 7.0);
    assert_eq!(summary.attendance.band, AttendanceBand::Warning);
    assert_eq!(summary.notifications.len(), 1);
}

#[test]
fn test_dashboard_notifications() {
    let university = sample();
    let titles: Vec<_> = dashboard_notifications(&university, 5)
        .iter()
        .map(|n| n.title.as_str())
        .collect();
    // Faculty-only and inactive notices are hidden; newest first
    assert_eq!(
        titles,
        [
            "Fee payment deadline",
            "Hackathon registrations open",
            "Mid-semester examinations"
        ]
    );
    assert_eq!(dashboard_notifications(&university, 2).len(), 2);
    assert!(dashboard_notifications(&university, 0).is_empty());
}

#[test]
fn test_fee_balance_counts_completed_payments_on_any_structure() {
    let records = "Institution,Test University\n\
        Academic Year,2024-25\n\
        \n\
        Programmes\n\
        ID,Code,Name\n\
        1,BTCS,B.Tech CS\n\
        \n\
        Students\n\
        ID,Enrollment Number,First Name,Last Name,Programme ID,Semester\n\
        1,EN001,Asha,Rao,1,3\n\
        \n\
        Fee Structure\n\
        ID,Programme ID,Semester,Academic Year,Tuition\n\
        1,1,3,2024-25,50000\n\
        2,1,2,2023-24,45000\n\
        \n\
        Fee Payments\n\
        Student ID,Fee Structure ID,Amount,Date,Method,Receipt Number,Status\n\
        1,1,30000,2024-07-20,Online,R-1,Completed\n\
        1,2,10000,2024-01-10,Card,R-2,Completed\n\
        1,1,5000,2024-08-01,Online,R-3,Failed\n";
    let university = parse_records_str(records).expect("parse records");
    let asha = university.find_student("EN001").unwrap();
    let summary = StudentSummary::build(&university, asha, &SummaryOptions::default());

    let fees = &summary.fees;
    assert_eq!(fees.structure.map(|s| s.id), Some(1));
    assert_close(fees.total_due, 50_000.0);
    assert_close(fees.paid, 40_000.0);
    assert_close(fees.balance, 10_000.0);
    assert_eq!(fees.payments.len(), 3);
}
