//! Library for `UniHub` student records
//!
//! Loads a sectioned records CSV into a [`core::models::University`], computes
//! GPA, attendance, internship credits and fee balances, and renders student
//! reports, the schema catalogue and the portal diagrams.

pub mod core;

pub use crate::core::config;
pub use crate::core::get_version;
