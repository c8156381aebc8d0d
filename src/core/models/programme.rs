//! Programme model (a degree course such as "B.Tech Computer Science")

use serde::{Deserialize, Serialize};

/// A programme of study that students enrol in and subjects belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Programme {
    /// Numeric identifier referenced by students, subjects and fee structures
    pub id: u32,

    /// Short unique code (e.g., "BTCS")
    pub code: String,

    /// Display name (e.g., "B.Tech Computer Science")
    pub name: String,

    /// Owning department
    pub department: String,

    /// Nominal length in years
    pub duration_years: u32,

    /// Number of semesters in the programme
    pub total_semesters: u32,
}

impl Programme {
    /// Create a new programme
    #[must_use]
    pub const fn new(
        id: u32,
        code: String,
        name: String,
        department: String,
        duration_years: u32,
        total_semesters: u32,
    ) -> Self {
        Self {
            id,
            code,
            name,
            department,
            duration_years,
            total_semesters,
        }
    }

    /// Whether `semester` lies within this programme
    #[must_use]
    pub const fn has_semester(&self, semester: u32) -> bool {
        semester >= 1 && semester <= self.total_semesters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_bounds() {
        let p = Programme::new(
            1,
            "BTCS".to_string(),
            "B.Tech Computer Science".to_string(),
            "Computer Science".to_string(),
            4,
            8,
        );
        assert!(p.has_semester(1));
        assert!(p.has_semester(8));
        assert!(!p.has_semester(0));
        assert!(!p.has_semester(9));
    }
}
