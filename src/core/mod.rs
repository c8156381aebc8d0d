//! Core module: records model, academics engine, reports and schema

pub mod academics;
pub mod config;
pub mod models;
pub mod records;
pub mod report;
pub mod schema;
pub mod summary_export;

/// Returns the current version of the `UniHub` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
