//! University model: the aggregate of all UniHub records

use super::{
    AttendanceRecord, FeePayment, FeeStructure, GradeRecord, Internship, Notification, Programme,
    Student, Subject,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All records for one institution and academic year
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct University {
    /// Institution name
    pub name: String,

    /// Current academic year label (e.g., "2024-25")
    pub academic_year: String,

    programmes: BTreeMap<u32, Programme>,
    subjects: BTreeMap<u32, Subject>,
    students: BTreeMap<u32, Student>,
    fee_structures: BTreeMap<u32, FeeStructure>,
    attendance: Vec<AttendanceRecord>,
    grades: Vec<GradeRecord>,
    internships: Vec<Internship>,
    payments: Vec<FeePayment>,
    notifications: Vec<Notification>,
}

impl University {
    /// Create an empty university
    ///
    /// # Arguments
    /// * `name` - Institution name
    /// * `academic_year` - Current academic year label
    #[must_use]
    pub fn new(name: String, academic_year: String) -> Self {
        Self {
            name,
            academic_year,
            ..Self::default()
        }
    }

    /// Add a programme
    ///
    /// # Returns
    /// `true` if added, `false` if the id or code is already taken
    pub fn add_programme(&mut self, programme: Programme) -> bool {
        if self.programmes.contains_key(&programme.id)
            || self.programmes.values().any(|p| p.code == programme.code)
        {
            return false;
        }
        self.programmes.insert(programme.id, programme);
        true
    }

    /// Look up a programme by id
    #[must_use]
    pub fn get_programme(&self, id: u32) -> Option<&Programme> {
        self.programmes.get(&id)
    }

    /// All programmes ordered by id
    pub fn programmes(&self) -> impl Iterator<Item = &Programme> {
        self.programmes.values()
    }

    /// Add a subject
    ///
    /// # Returns
    /// `true` if added, `false` if the id or code is already taken
    pub fn add_subject(&mut self, subject: Subject) -> bool {
        if self.subjects.contains_key(&subject.id)
            || self.subjects.values().any(|s| s.code == subject.code)
        {
            return false;
        }
        self.subjects.insert(subject.id, subject);
        true
    }

    /// Look up a subject by id
    #[must_use]
    pub fn get_subject(&self, id: u32) -> Option<&Subject> {
        self.subjects.get(&id)
    }

    /// All subjects ordered by id
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values()
    }

    /// Add a student
    ///
    /// # Returns
    /// `true` if added, `false` if the id or enrollment number is already taken
    pub fn add_student(&mut self, student: Student) -> bool {
        if self.students.contains_key(&student.id)
            || self.find_student(&student.enrollment_number).is_some()
        {
            return false;
        }
        self.students.insert(student.id, student);
        true
    }

    /// Look up a student by id
    #[must_use]
    pub fn get_student(&self, id: u32) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Look up a student by enrollment number (case-insensitive)
    #[must_use]
    pub fn find_student(&self, enrollment_number: &str) -> Option<&Student> {
        self.students
            .values()
            .find(|s| s.enrollment_number.eq_ignore_ascii_case(enrollment_number.trim()))
    }

    /// All students ordered by enrollment number
    #[must_use]
    pub fn students(&self) -> Vec<&Student> {
        let mut students: Vec<_> = self.students.values().collect();
        students.sort_by(|a, b| a.enrollment_number.cmp(&b.enrollment_number));
        students
    }

    /// Record an attendance mark
    ///
    /// # Returns
    /// `true` if added, `false` if the (student, subject, date) mark already exists
    pub fn add_attendance(&mut self, record: AttendanceRecord) -> bool {
        let key = record.key();
        if self.attendance.iter().any(|r| r.key() == key) {
            return false;
        }
        self.attendance.push(record);
        true
    }

    /// Attendance marks for a student
    pub fn attendance_for(&self, student_id: u32) -> impl Iterator<Item = &AttendanceRecord> {
        self.attendance
            .iter()
            .filter(move |r| r.student_id == student_id)
    }

    /// Record a grade
    ///
    /// # Returns
    /// `true` if added, `false` if the (student, subject, semester, year) grade already exists
    pub fn add_grade(&mut self, grade: GradeRecord) -> bool {
        let key = grade.key();
        if self.grades.iter().any(|g| g.key() == key) {
            return false;
        }
        self.grades.push(grade);
        true
    }

    /// All grades for a student
    pub fn grades_for(&self, student_id: u32) -> impl Iterator<Item = &GradeRecord> {
        self.grades.iter().filter(move |g| g.student_id == student_id)
    }

    /// Grades for a student in one semester
    pub fn grades_for_semester(
        &self,
        student_id: u32,
        semester: u32,
    ) -> impl Iterator<Item = &GradeRecord> {
        self.grades_for(student_id)
            .filter(move |g| g.semester == semester)
    }

    /// Record an internship
    pub fn add_internship(&mut self, internship: Internship) {
        self.internships.push(internship);
    }

    /// Internships for a student, most recent start first
    #[must_use]
    pub fn internships_for(&self, student_id: u32) -> Vec<&Internship> {
        let mut list: Vec<_> = self
            .internships
            .iter()
            .filter(|i| i.student_id == student_id)
            .collect();
        list.sort_by(|a, b| b.start.cmp(&a.start));
        list
    }

    /// Add a fee structure
    ///
    /// # Returns
    /// `true` if added, `false` if the id or (programme, semester, year) is already taken
    pub fn add_fee_structure(&mut self, structure: FeeStructure) -> bool {
        let key = structure.key();
        if self.fee_structures.contains_key(&structure.id)
            || self.fee_structures.values().any(|f| f.key() == key)
        {
            return false;
        }
        self.fee_structures.insert(structure.id, structure);
        true
    }

    /// Look up a fee structure by id
    #[must_use]
    pub fn get_fee_structure(&self, id: u32) -> Option<&FeeStructure> {
        self.fee_structures.get(&id)
    }

    /// Fee structure for the student's programme and current semester
    ///
    /// Prefers the university's current academic year, otherwise the latest year on file.
    #[must_use]
    pub fn current_fee_structure(&self, student: &Student) -> Option<&FeeStructure> {
        let mut matching: Vec<_> = self
            .fee_structures
            .values()
            .filter(|f| f.programme_id == student.programme_id && f.semester == student.semester)
            .collect();
        if let Some(current) = matching
            .iter()
            .find(|f| f.academic_year == self.academic_year)
            .copied()
        {
            return Some(current);
        }
        matching.sort_by(|a, b| b.academic_year.cmp(&a.academic_year));
        matching.first().copied()
    }

    /// Record a payment
    ///
    /// # Returns
    /// `true` if added, `false` if the receipt number is already used
    pub fn add_payment(&mut self, payment: FeePayment) -> bool {
        if self
            .payments
            .iter()
            .any(|p| p.receipt_number == payment.receipt_number)
        {
            return false;
        }
        self.payments.push(payment);
        true
    }

    /// Payments made by a student, newest first
    #[must_use]
    pub fn payments_for(&self, student_id: u32) -> Vec<&FeePayment> {
        let mut list: Vec<_> = self
            .payments
            .iter()
            .filter(|p| p.student_id == student_id)
            .collect();
        list.sort_by(|a, b| b.date.cmp(&a.date));
        list
    }

    /// Post a notification
    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// All notifications in insertion order
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Validate that every foreign key resolves
    ///
    /// # Errors
    /// Returns `Err` with one message per dangling reference
    pub fn validate_references(&self) -> Result<(), Vec<String>> {
        let mut invalid = Vec::new();

        for subject in self.subjects.values() {
            if !self.programmes.contains_key(&subject.programme_id) {
                invalid.push(format!(
                    "Subject '{}': programme {} not found",
                    subject.code, subject.programme_id
                ));
            }
        }

        for student in self.students.values() {
            if !self.programmes.contains_key(&student.programme_id) {
                invalid.push(format!(
                    "Student '{}': programme {} not found",
                    student.enrollment_number, student.programme_id
                ));
            }
        }

        for structure in self.fee_structures.values() {
            if !self.programmes.contains_key(&structure.programme_id) {
                invalid.push(format!(
                    "Fee structure {}: programme {} not found",
                    structure.id, structure.programme_id
                ));
            }
        }

        let student_subject_refs = self
            .attendance
            .iter()
            .map(|r| ("Attendance", r.student_id, Some(r.subject_id)))
            .chain(
                self.grades
                    .iter()
                    .map(|g| ("Grade", g.student_id, Some(g.subject_id))),
            )
            .chain(
                self.internships
                    .iter()
                    .map(|i| ("Internship", i.student_id, None)),
            )
            .chain(self.payments.iter().map(|p| ("Payment", p.student_id, None)));

        for (kind, student_id, subject_id) in student_subject_refs {
            if !self.students.contains_key(&student_id) {
                invalid.push(format!("{kind}: student {student_id} not found"));
            }
            if let Some(subject_id) = subject_id {
                if !self.subjects.contains_key(&subject_id) {
                    invalid.push(format!("{kind}: subject {subject_id} not found"));
                }
            }
        }

        for payment in &self.payments {
            if !self.fee_structures.contains_key(&payment.fee_structure_id) {
                invalid.push(format!(
                    "Payment '{}': fee structure {} not found",
                    payment.receipt_number, payment.fee_structure_id
                ));
            }
        }

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{AttendanceStatus, PaymentMethod, PaymentStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> University {
        let mut uni = University::new("Test University".to_string(), "2024-25".to_string());
        assert!(uni.add_programme(Programme::new(
            1,
            "BTCS".into(),
            "B.Tech CS".into(),
            "CS".into(),
            4,
            8
        )));
        assert!(uni.add_subject(Subject::new(10, "CS301".into(), "OS".into(), 1, 5, 4)));
        assert!(uni.add_student(Student::new(
            100,
            "EN001".into(),
            "Asha".into(),
            "Rao".into(),
            1,
            5
        )));
        uni
    }

    #[test]
    fn test_university_creation() {
        let uni = University::new("Test University".to_string(), "2024-25".to_string());
        assert_eq!(uni.name, "Test University");
        assert!(uni.students().is_empty());
        assert!(uni.notifications().is_empty());
    }

    #[test]
    fn rejects_duplicate_enrollment() {
        let mut uni = sample();
        let dup = Student::new(101, "en001".into(), "B".into(), "C".into(), 1, 1);
        assert!(!uni.add_student(dup));
        assert!(uni.find_student("EN001").is_some());
    }

    #[test]
    fn rejects_duplicate_attendance_mark() {
        let mut uni = sample();
        let mark = AttendanceRecord::new(100, 10, date(2024, 8, 1), AttendanceStatus::Present);
        assert!(uni.add_attendance(mark.clone()));
        assert!(!uni.add_attendance(mark));
        assert_eq!(uni.attendance_for(100).count(), 1);
    }

    #[test]
    fn current_fee_structure_prefers_current_year() {
        let mut uni = sample();
        let base = FeeStructure {
            id: 1,
            programme_id: 1,
            semester: 5,
            academic_year: "2023-24".into(),
            tuition: 40_000.0,
            library: 0.0,
            lab: 0.0,
            other: 0.0,
        };
        assert!(uni.add_fee_structure(base.clone()));
        let student = uni.get_student(100).unwrap().clone();
        assert_eq!(uni.current_fee_structure(&student).map(|f| f.id), Some(1));

        assert!(uni.add_fee_structure(FeeStructure {
            id: 2,
            academic_year: "2024-25".into(),
            ..base
        }));
        assert_eq!(uni.current_fee_structure(&student).map(|f| f.id), Some(2));
    }

    #[test]
    fn validate_references_reports_dangling_keys() {
        let mut uni = sample();
        assert!(uni.validate_references().is_ok());

        uni.add_grade(GradeRecord::new(999, 10, 5, "2024-25".into()));
        uni.add_payment(FeePayment {
            student_id: 100,
            fee_structure_id: 42,
            amount: 10.0,
            date: date(2024, 7, 1),
            method: PaymentMethod::Online,
            receipt_number: "R1".into(),
            status: PaymentStatus::Completed,
        });

        let errors = uni.validate_references().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("student 999")));
        assert!(errors.iter().any(|e| e.contains("fee structure 42")));
    }
}
