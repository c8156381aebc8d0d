//! Grade model

use serde::{Deserialize, Serialize};

/// Marks for one subject in one semester; (student, subject, semester, year) is unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Student the marks belong to
    pub student_id: u32,
    /// Subject graded
    pub subject_id: u32,
    /// Semester in which the subject was taken
    pub semester: u32,
    /// Academic year label (e.g., "2024-25")
    pub academic_year: String,
    /// Internal marks, if entered
    pub internal_marks: Option<f64>,
    /// External marks, if entered
    pub external_marks: Option<f64>,
    /// Explicit grade points; overrides the conversion table when present
    pub grade_points: Option<f64>,
}

impl GradeRecord {
    /// Create a grade record with no marks entered yet
    #[must_use]
    pub const fn new(student_id: u32, subject_id: u32, semester: u32, academic_year: String) -> Self {
        Self {
            student_id,
            subject_id,
            semester,
            academic_year,
            internal_marks: None,
            external_marks: None,
            grade_points: None,
        }
    }

    /// Set internal and external marks
    #[must_use]
    pub const fn with_marks(mut self, internal: f64, external: f64) -> Self {
        self.internal_marks = Some(internal);
        self.external_marks = Some(external);
        self
    }

    /// Set explicit grade points
    #[must_use]
    pub const fn with_grade_points(mut self, points: f64) -> Self {
        self.grade_points = Some(points);
        self
    }

    /// Sum of internal and external marks, when both are entered
    #[must_use]
    pub fn total_marks(&self) -> Option<f64> {
        Some(self.internal_marks? + self.external_marks?)
    }

    /// Uniqueness key
    #[must_use]
    pub fn key(&self) -> (u32, u32, u32, String) {
        (
            self.student_id,
            self.subject_id,
            self.semester,
            self.academic_year.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_requires_both_marks() {
        let mut g = GradeRecord::new(1, 1, 5, "2024-25".into());
        assert!(g.total_marks().is_none());
        g.internal_marks = Some(25.0);
        assert!(g.total_marks().is_none());
        let g = g.with_marks(25.0, 60.5);
        assert_eq!(g.total_marks(), Some(85.5));
    }
}
