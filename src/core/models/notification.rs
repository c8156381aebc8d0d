//! Administrative notification model

use super::UnknownVariant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Formal circular
    Circular,
    /// General announcement
    Announcement,
    /// Time-sensitive alert
    Alert,
}

impl FromStr for NotificationKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circular" => Ok(Self::Circular),
            "announcement" => Ok(Self::Announcement),
            "alert" => Ok(Self::Alert),
            _ => Err(UnknownVariant::new("notification type", s)),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circular => write!(f, "Circular"),
            Self::Announcement => write!(f, "Announcement"),
            Self::Alert => write!(f, "Alert"),
        }
    }
}

/// Who a notification is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Audience {
    /// Everyone
    #[default]
    All,
    /// Students only
    Students,
    /// Faculty only
    Faculty,
}

impl Audience {
    /// Whether students see this audience on their dashboard
    #[must_use]
    pub const fn reaches_students(self) -> bool {
        matches!(self, Self::All | Self::Students)
    }
}

impl FromStr for Audience {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "students" | "student" => Ok(Self::Students),
            "faculty" => Ok(Self::Faculty),
            _ => Err(UnknownVariant::new("audience", s)),
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Students => write!(f, "Students"),
            Self::Faculty => write!(f, "Faculty"),
        }
    }
}

/// A notice posted by the administration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Category
    pub kind: NotificationKind,
    /// Target audience
    pub audience: Audience,
    /// Posting date
    pub created: NaiveDate,
    /// Inactive notices are hidden
    pub active: bool,
}
