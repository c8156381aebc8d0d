//! Integration tests for records CSV parsing

use std::fs;
use tempfile::TempDir;
use unihub::core::models::{
    AttendanceStatus, Audience, InternshipStatus, NotificationKind, PaymentMethod, PaymentStatus,
    StudentStatus,
};
use unihub::core::records::{parse_records_csv, RecordsError};

const SAMPLE: &str = "samples/records/sample_university.csv";

#[test]
fn test_parse_sample_records() {
    let result = parse_records_csv(SAMPLE);
    assert!(result.is_ok(), "Failed to parse records: {:?}", result.err());
    let university = result.unwrap();

    assert_eq!(university.name, "UniHub Institute of Technology");
    assert_eq!(university.academic_year, "2024-25");
    assert_eq!(university.programmes().count(), 2);
    assert_eq!(university.subjects().count(), 6);
    assert_eq!(university.students().len(), 4);
    assert_eq!(university.notifications().len(), 5);

    let programme = university.get_programme(2).unwrap();
    assert_eq!(programme.code, "MBA");
    assert_eq!(programme.total_semesters, 4);

    let subject = university.get_subject(6).unwrap();
    assert!((subject.max_total() - 100.0).abs() < f64::EPSILON);
    assert!((subject.max_internal - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_students_and_defaults() {
    let university = parse_records_csv(SAMPLE).unwrap();

    let asha = university.find_student("EN2023001").unwrap();
    assert_eq!(asha.full_name(), "Asha Rao");
    assert_eq!(asha.email.as_deref(), Some("asha.rao@unihub.edu"));
    assert_eq!(asha.status, StudentStatus::Active);

    let arjun = university.find_student("en2019007").unwrap();
    assert!(arjun.email.is_none());
    assert_eq!(arjun.status, StudentStatus::Graduated);

    // students() is ordered by enrollment number
    let order: Vec<_> = university
        .students()
        .iter()
        .map(|s| s.enrollment_number.as_str())
        .collect();
    assert_eq!(order, ["EN2019007", "EN2023001", "EN2023002", "EN2024001"]);
}

#[test]
fn test_records_per_student() {
    let university = parse_records_csv(SAMPLE).unwrap();

    let marks: Vec<_> = university.attendance_for(1).collect();
    assert_eq!(marks.len(), 8);
    assert_eq!(
        marks
            .iter()
            .filter(|m| m.status == AttendanceStatus::Late)
            .count(),
        1
    );

    assert_eq!(university.grades_for(1).count(), 5);
    assert_eq!(university.grades_for_semester(1, 3).count(), 4);

    let internships = university.internships_for(1);
    assert_eq!(internships.len(), 2);
    assert!(internships
        .iter()
        .any(|i| i.company == "Tata Consultancy Services, Pune"
            && i.status == InternshipStatus::Ongoing));

    let payments = university.payments_for(1);
    assert_eq!(payments.len(), 2);
    assert!(payments
        .iter()
        .any(|p| p.method == PaymentMethod::Card && p.status == PaymentStatus::Pending));
}

#[test]
fn test_notifications_parsed() {
    let university = parse_records_csv(SAMPLE).unwrap();
    let deadline = university
        .notifications()
        .iter()
        .find(|n| n.title == "Fee payment deadline")
        .unwrap();
    assert_eq!(deadline.kind, NotificationKind::Alert);
    assert_eq!(deadline.audience, Audience::Students);
    assert!(deadline.active);

    let exams = university
        .notifications()
        .iter()
        .find(|n| n.title == "Mid-semester examinations")
        .unwrap();
    assert!(exams.content.contains("14 October, see"));

    assert!(university.notifications().iter().any(|n| !n.active));
}

#[test]
fn test_missing_file() {
    let err = parse_records_csv("samples/records/does_not_exist.csv").unwrap_err();
    assert!(matches!(err, RecordsError::Io(_)));
}

fn write_temp(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("records.csv");
    fs::write(&path, content).expect("Failed to write records");
    (dir, path)
}

#[test]
fn test_bad_number_reports_line() {
    let (_dir, path) = write_temp(
        "Institution,Test\n\nStudents\nID,Enrollment Number,First Name,Last Name,Programme ID,Semester\nx,EN1,A,B,1,1\n",
    );
    let err = parse_records_csv(&path).unwrap_err();
    match err {
        RecordsError::BadNumber {
            section,
            line,
            column,
            value,
        } => {
            assert_eq!(section, "Students");
            assert_eq!(line, 5);
            assert_eq!(column, "ID");
            assert_eq!(value, "x");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_attendance_status() {
    let (_dir, path) = write_temp(
        "Institution,Test\n\nProgrammes\nID,Code,Name\n1,P,Prog\n\nSubjects\nID,Code,Name,Programme ID,Semester,Credits\n1,S1,Sub,1,1,3\n\nStudents\nID,Enrollment Number,First Name,Last Name,Programme ID,Semester\n1,EN1,A,B,1,1\n\nAttendance\nStudent ID,Subject ID,Date,Status\n1,1,2024-08-01,Excused\n",
    );
    let err = parse_records_csv(&path).unwrap_err();
    assert!(matches!(err, RecordsError::UnknownValue { line: 17, .. }));
    assert!(err.to_string().contains("Excused"));
}

#[test]
fn test_bad_date() {
    let (_dir, path) = write_temp(
        "Institution,Test\n\nProgrammes\nID,Code,Name\n1,P,Prog\n\nSubjects\nID,Code,Name,Programme ID,Semester,Credits\n1,S1,Sub,1,1,3\n\nStudents\nID,Enrollment Number,First Name,Last Name,Programme ID,Semester\n1,EN1,A,B,1,1\n\nAttendance\nStudent ID,Subject ID,Date,Status\n1,1,01/08/2024,Present\n",
    );
    let err = parse_records_csv(&path).unwrap_err();
    assert!(matches!(err, RecordsError::BadDate { column: "Date", .. }));
}

#[test]
fn test_duplicate_attendance_mark() {
    let (_dir, path) = write_temp(
        "Institution,Test\n\nProgrammes\nID,Code,Name\n1,P,Prog\n\nSubjects\nID,Code,Name,Programme ID,Semester,Credits\n1,S1,Sub,1,1,3\n\nStudents\nID,Enrollment Number,First Name,Last Name,Programme ID,Semester\n1,EN1,A,B,1,1\n\nAttendance\nStudent ID,Subject ID,Date,Status\n1,1,2024-08-01,Present\n1,1,2024-08-01,Absent\n",
    );
    let err = parse_records_csv(&path).unwrap_err();
    assert!(matches!(err, RecordsError::Duplicate { line: 18, .. }));
}

#[test]
fn test_dangling_reference() {
    let (_dir, path) = write_temp(
        "Institution,Test\n\nProgrammes\nID,Code,Name\n1,P,Prog\n\nStudents\nID,Enrollment Number,First Name,Last Name,Programme ID,Semester\n1,EN1,A,B,9,1\n",
    );
    let err = parse_records_csv(&path).unwrap_err();
    match err {
        RecordsError::DanglingReferences(problems) => assert_eq!(problems.len(), 1),
        other => panic!("unexpected error: {other}"),
    }
}
