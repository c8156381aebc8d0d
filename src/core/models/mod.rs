//! Data models for UniHub student records

pub mod attendance;
pub mod fee;
pub mod grade;
pub mod internship;
pub mod notification;
pub mod programme;
pub mod student;
pub mod subject;
pub mod university;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use fee::{FeePayment, FeeStructure, PaymentMethod, PaymentStatus};
pub use grade::GradeRecord;
pub use internship::{Internship, InternshipStatus};
pub use notification::{Audience, Notification, NotificationKind};
pub use programme::Programme;
pub use student::{Student, StudentStatus};
pub use subject::Subject;
pub use university::University;

/// Error returned when an enum cell holds a value outside its vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    /// Which vocabulary was being parsed (e.g. "attendance status")
    pub kind: &'static str,
    /// The offending input
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
