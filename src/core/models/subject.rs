//! Subject model

use serde::{Deserialize, Serialize};

/// Default maximum internal (continuous assessment) marks
pub const DEFAULT_MAX_INTERNAL: f64 = 30.0;

/// Default maximum external (end-semester exam) marks
pub const DEFAULT_MAX_EXTERNAL: f64 = 70.0;

/// A subject taught in one semester of a programme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Numeric identifier
    pub id: u32,

    /// Unique subject code (e.g., "CS301")
    pub code: String,

    /// Subject name (e.g., "Operating Systems")
    pub name: String,

    /// Programme this subject belongs to
    pub programme_id: u32,

    /// Semester in which the subject is taught
    pub semester: u32,

    /// Credit weight used for GPA
    pub credits: u32,

    /// Maximum internal marks
    pub max_internal: f64,

    /// Maximum external marks
    pub max_external: f64,
}

impl Subject {
    /// Create a subject with the default 30/70 internal/external split
    #[must_use]
    pub const fn new(
        id: u32,
        code: String,
        name: String,
        programme_id: u32,
        semester: u32,
        credits: u32,
    ) -> Self {
        Self {
            id,
            code,
            name,
            programme_id,
            semester,
            credits,
            max_internal: DEFAULT_MAX_INTERNAL,
            max_external: DEFAULT_MAX_EXTERNAL,
        }
    }

    /// Override the maximum marks
    #[must_use]
    pub const fn with_max_marks(mut self, internal: f64, external: f64) -> Self {
        self.max_internal = internal;
        self.max_external = external;
        self
    }

    /// Maximum total marks (internal + external)
    #[must_use]
    pub fn max_total(&self) -> f64 {
        self.max_internal + self.max_external
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_totals_hundred() {
        let s = Subject::new(1, "CS301".into(), "Operating Systems".into(), 1, 5, 4);
        assert!((s.max_total() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn custom_split() {
        let s = Subject::new(2, "CS391".into(), "OS Lab".into(), 1, 5, 2).with_max_marks(50.0, 50.0);
        assert!((s.max_internal - 50.0).abs() < f64::EPSILON);
        assert!((s.max_total() - 100.0).abs() < f64::EPSILON);
    }
}
