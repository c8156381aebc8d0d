//! Loading UniHub records from sectioned CSV files

pub mod csv_parser;

pub use csv_parser::{parse_records_csv, parse_records_str, Section};

use crate::core::models::UnknownVariant;
use thiserror::Error;

/// Errors raised while loading a records file
#[derive(Debug, Error)]
pub enum RecordsError {
    /// The file could not be read
    #[error("cannot read records file: {0}")]
    Io(#[from] std::io::Error),

    /// A required metadata line is absent
    #[error("missing required '{0}' line")]
    MissingMetadata(&'static str),

    /// A required section is absent
    #[error("missing required '{0}' section")]
    MissingSection(&'static str),

    /// A section title was not followed by a header row
    #[error("line {line}: '{section}' section has no header row")]
    MissingHeader {
        /// Section title
        section: &'static str,
        /// Line of the section title
        line: usize,
    },

    /// A required cell is missing or empty
    #[error("line {line}: {section} row has no value for '{column}'")]
    MissingColumn {
        /// Section title
        section: &'static str,
        /// 1-based line number
        line: usize,
        /// Column header
        column: &'static str,
    },

    /// A numeric cell did not parse
    #[error("line {line}: invalid number '{value}' in {section} column '{column}'")]
    BadNumber {
        /// Section title
        section: &'static str,
        /// 1-based line number
        line: usize,
        /// Column header
        column: &'static str,
        /// Offending text
        value: String,
    },

    /// A date cell is not `YYYY-MM-DD`
    #[error("line {line}: invalid date '{value}' in {section} column '{column}' (expected YYYY-MM-DD)")]
    BadDate {
        /// Section title
        section: &'static str,
        /// 1-based line number
        line: usize,
        /// Column header
        column: &'static str,
        /// Offending text
        value: String,
    },

    /// An enum cell holds an unknown value
    #[error("line {line}: {section}: {source}")]
    UnknownValue {
        /// Section title
        section: &'static str,
        /// 1-based line number
        line: usize,
        /// Underlying parse failure
        #[source]
        source: UnknownVariant,
    },

    /// A unique key appears twice
    #[error("line {line}: duplicate {section} entry {key}")]
    Duplicate {
        /// Section title
        section: &'static str,
        /// 1-based line number
        line: usize,
        /// Rendered key
        key: String,
    },

    /// A data row appeared outside any section
    #[error("line {line}: row outside any section")]
    UnexpectedRow {
        /// 1-based line number
        line: usize,
    },

    /// Foreign keys that point nowhere
    #[error("dangling references:\n  {}", .0.join("\n  "))]
    DanglingReferences(Vec<String>),
}
