//! Attendance model

use super::UnknownVariant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mark recorded for one class session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Attended the session
    Present,
    /// Missed the session
    Absent,
    /// Arrived late; recorded but not counted as attended
    Late,
}

impl AttendanceStatus {
    /// Whether this mark counts toward the attendance percentage
    #[must_use]
    pub const fn is_attended(self) -> bool {
        matches!(self, Self::Present)
    }
}

impl FromStr for AttendanceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" | "p" => Ok(Self::Present),
            "absent" | "a" => Ok(Self::Absent),
            "late" | "l" => Ok(Self::Late),
            _ => Err(UnknownVariant::new("attendance status", s)),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "Present"),
            Self::Absent => write!(f, "Absent"),
            Self::Late => write!(f, "Late"),
        }
    }
}

/// One attendance mark; (student, subject, date) is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Student the mark belongs to
    pub student_id: u32,
    /// Subject of the session
    pub subject_id: u32,
    /// Session date
    pub date: NaiveDate,
    /// Recorded status
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Create an attendance record
    #[must_use]
    pub const fn new(
        student_id: u32,
        subject_id: u32,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            student_id,
            subject_id,
            date,
            status,
        }
    }

    /// Uniqueness key
    #[must_use]
    pub const fn key(&self) -> (u32, u32, NaiveDate) {
        (self.student_id, self.subject_id, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_counts() {
        assert!(AttendanceStatus::Present.is_attended());
        assert!(!AttendanceStatus::Late.is_attended());
        assert!(!AttendanceStatus::Absent.is_attended());
    }

    #[test]
    fn parses_short_marks() {
        assert_eq!("P".parse(), Ok(AttendanceStatus::Present));
        assert_eq!(" absent ".parse(), Ok(AttendanceStatus::Absent));
        assert_eq!("late".parse(), Ok(AttendanceStatus::Late));
        assert!("excused".parse::<AttendanceStatus>().is_err());
    }
}
