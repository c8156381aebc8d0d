//! Internship model

use super::UnknownVariant;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress of an internship through verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InternshipStatus {
    /// Still in progress
    #[default]
    Ongoing,
    /// Finished, awaiting verification
    Completed,
    /// Certificate verified by an administrator
    Verified,
}

impl FromStr for InternshipStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "verified" => Ok(Self::Verified),
            _ => Err(UnknownVariant::new("internship status", s)),
        }
    }
}

impl fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "Ongoing"),
            Self::Completed => write!(f, "Completed"),
            Self::Verified => write!(f, "Verified"),
        }
    }
}

/// An internship undertaken by a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Internship {
    /// Student who did the internship
    pub student_id: u32,
    /// Host company
    pub company: String,
    /// Role held
    pub position: String,
    /// First day
    pub start: NaiveDate,
    /// Last day
    pub end: NaiveDate,
    /// Academic credits awarded
    pub credits_earned: u32,
    /// Verification status
    pub status: InternshipStatus,
}

impl Internship {
    /// Length in whole calendar months, counting a started month as one
    #[must_use]
    pub fn duration_months(&self) -> u32 {
        if self.end < self.start {
            return 0;
        }
        let years = self.end.year() - self.start.year();
        let months = years * 12 + self.end.month() as i32 - self.start.month() as i32;
        let partial = i32::from(self.end.day() >= self.start.day());
        u32::try_from(months + partial).unwrap_or(0).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internship(start: (i32, u32, u32), end: (i32, u32, u32)) -> Internship {
        Internship {
            student_id: 1,
            company: "Acme".into(),
            position: "Intern".into(),
            start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            credits_earned: 2,
            status: InternshipStatus::Completed,
        }
    }

    #[test]
    fn duration_counts_started_months() {
        assert_eq!(internship((2024, 5, 15), (2024, 7, 14)).duration_months(), 2);
        assert_eq!(internship((2024, 5, 15), (2024, 7, 15)).duration_months(), 3);
        assert_eq!(internship((2024, 11, 1), (2025, 1, 31)).duration_months(), 3);
    }

    #[test]
    fn inverted_range_is_zero() {
        assert_eq!(internship((2024, 7, 1), (2024, 5, 1)).duration_months(), 0);
    }

    #[test]
    fn status_defaults_to_ongoing() {
        assert_eq!("".parse(), Ok(InternshipStatus::Ongoing));
        assert_eq!("Verified".parse(), Ok(InternshipStatus::Verified));
    }
}
