//! Student model

use super::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enrolment status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StudentStatus {
    /// Currently enrolled
    #[default]
    Active,
    /// Enrolment suspended or withdrawn
    Inactive,
    /// Completed the programme
    Graduated,
}

impl FromStr for StudentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "graduated" => Ok(Self::Graduated),
            _ => Err(UnknownVariant::new("student status", s)),
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Graduated => write!(f, "Graduated"),
        }
    }
}

/// A student enrolled in a programme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Numeric identifier referenced by attendance, grades, internships and payments
    pub id: u32,

    /// Unique enrollment number used to log in and to look students up
    pub enrollment_number: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Contact email (optional)
    pub email: Option<String>,

    /// Programme the student is enrolled in
    pub programme_id: u32,

    /// Current semester
    pub semester: u32,

    /// Enrolment status
    pub status: StudentStatus,
}

impl Student {
    /// Create an active student
    #[must_use]
    pub const fn new(
        id: u32,
        enrollment_number: String,
        first_name: String,
        last_name: String,
        programme_id: u32,
        semester: u32,
    ) -> Self {
        Self {
            id,
            enrollment_number,
            first_name,
            last_name,
            email: None,
            programme_id,
            semester,
            status: StudentStatus::Active,
        }
    }

    /// "First Last"
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_parts() {
        let s = Student::new(1, "EN2021001".into(), "Asha".into(), "Rao".into(), 1, 5);
        assert_eq!(s.full_name(), "Asha Rao");
        assert_eq!(s.status, StudentStatus::Active);
    }

    #[test]
    fn status_parsing() {
        assert_eq!("GRADUATED".parse(), Ok(StudentStatus::Graduated));
        assert_eq!("".parse(), Ok(StudentStatus::Active));
        assert!("expelled".parse::<StudentStatus>().is_err());
    }
}
