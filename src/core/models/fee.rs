//! Fee structure and payment models

use super::UnknownVariant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fees charged for one semester of a programme; (programme, semester, year) is unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeStructure {
    /// Numeric identifier referenced by payments
    pub id: u32,
    /// Programme charged
    pub programme_id: u32,
    /// Semester charged
    pub semester: u32,
    /// Academic year label (e.g., "2024-25")
    pub academic_year: String,
    /// Tuition fee
    pub tuition: f64,
    /// Library fee
    pub library: f64,
    /// Laboratory fee
    pub lab: f64,
    /// Any other charges
    pub other: f64,
}

impl FeeStructure {
    /// Total fee due: tuition + library + lab + other
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tuition + self.library + self.lab + self.other
    }

    /// Uniqueness key
    #[must_use]
    pub fn key(&self) -> (u32, u32, String) {
        (self.programme_id, self.semester, self.academic_year.clone())
    }
}

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Paid at the counter
    Cash,
    /// Debit or credit card
    Card,
    /// Online transfer
    Online,
    /// Cheque
    Cheque,
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "online" => Ok(Self::Online),
            "cheque" | "check" => Ok(Self::Cheque),
            _ => Err(UnknownVariant::new("payment method", s)),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Online => write!(f, "Online"),
            Self::Cheque => write!(f, "Cheque"),
        }
    }
}

/// Settlement state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Initiated, not yet settled
    Pending,
    /// Settled
    #[default]
    Completed,
    /// Rejected or reversed
    Failed,
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "" | "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownVariant::new("payment status", s)),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// A payment against a fee structure; `receipt_number` is unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeePayment {
    /// Paying student
    pub student_id: u32,
    /// Fee structure paid against
    pub fee_structure_id: u32,
    /// Amount paid
    pub amount: f64,
    /// Payment date
    pub date: NaiveDate,
    /// Payment method
    pub method: PaymentMethod,
    /// Receipt number
    pub receipt_number: String,
    /// Settlement status
    pub status: PaymentStatus,
}

impl FeePayment {
    /// Whether the amount counts as paid
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
