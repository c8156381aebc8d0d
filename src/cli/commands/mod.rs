//! CLI command handlers for `UniHub`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod calc;
pub mod config;
pub mod diagram;
pub mod report;
pub mod schema;
pub mod summary;
