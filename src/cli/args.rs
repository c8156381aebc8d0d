//! CLI argument definitions for `UniHub`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use logger::Level;
use unihub::config::ConfigOverrides;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Which diagram to draw
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DiagramKind {
    /// Database entity-relationship diagram
    Erd,
    /// Login and dashboard flowchart
    Flow,
    /// Both diagrams
    All,
}

/// Diagram output format
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DiagramFormat {
    /// Mermaid source (`.mmd`)
    Mermaid,
    /// Standalone SVG
    Svg,
}

impl DiagramFormat {
    /// File extension for this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mermaid => "mmd",
            Self::Svg => "svg",
        }
    }
}

/// Schema documentation format
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum SchemaFormat {
    /// Plain text
    Text,
    /// Markdown tables
    Markdown,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`, `attendance_good`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum CalcSubcommand {
    /// Credit-weighted GPA from `POINTS:CREDITS` pairs.
    Gpa {
        /// Grade entries such as `9:4 8:3 10:2`
        #[arg(value_name = "POINTS:CREDITS", num_args = 1..)]
        entries: Vec<String>,
    },
    /// Attendance percentage.
    Attendance {
        /// Classes attended
        #[arg(value_name = "PRESENT")]
        present: u32,
        /// Classes held
        #[arg(value_name = "TOTAL")]
        total: u32,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Export a per-student summary CSV.
    ///
    /// Load one or more records files and write GPA, attendance, internship
    /// credits and fee balance for every student.
    Summary {
        /// Paths to records CSV files (supports multiple)
        #[arg(value_name = "FILES", required = true, num_args = 1..)]
        input_files: Vec<PathBuf>,

        /// Output file paths (optional; defaults to config `exports_dir` when omitted)
        ///
        /// When provided, must match the number of input files 1:1.
        #[arg(short, long, value_name = "FILES", num_args = 1..)]
        output: Vec<PathBuf>,

        /// Semester to summarise (defaults to each student's current semester)
        #[arg(long, value_name = "N")]
        semester: Option<u32>,

        /// Also write one report per student in this format (markdown, html, pdf)
        #[arg(long, value_name = "FORMAT")]
        report: Option<String>,
    },
    /// Generate a student report from a records file.
    ///
    /// Creates a formatted dashboard with grades, attendance, internships, fees
    /// and notifications.
    Report {
        /// Path to records CSV file
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Enrollment number of the student
        #[arg(short, long, value_name = "ENROLLMENT")]
        student: String,

        /// Output file path (optional; defaults to config `reports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md), html, or pdf
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Semester to report (defaults to the student's current semester)
        #[arg(long, value_name = "N")]
        semester: Option<u32>,

        /// Browser used for PDF conversion (defaults to a detected Chrome/Chromium)
        #[arg(long, value_name = "CMD")]
        pdf_converter: Option<String>,
    },
    /// Draw the database ERD and the login flowchart.
    Diagram {
        /// Diagram to draw
        #[arg(value_enum, default_value = "all")]
        kind: DiagramKind,

        /// Output format
        #[arg(short, long, value_enum, default_value = "svg")]
        format: DiagramFormat,

        /// Output directory (optional; defaults to config `diagrams_dir`)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Print the database schema catalogue.
    Schema {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: SchemaFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Quick GPA and attendance calculations.
    Calc {
        #[command(subcommand)]
        subcommand: CalcSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "unihub",
    about = "UniHub student records command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config summary export directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config summary export directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config diagrams directory
    #[arg(long = "diagrams-dir", value_name = "DIR")]
    pub diagrams_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be applied to
    /// the loaded configuration. `--out-dir` takes precedence over `--config-out-dir`
    /// when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            exports_dir: path_string(self.out_dir.as_ref())
                .or_else(|| path_string(self.config_out_dir.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref()),
            diagrams_dir: path_string(self.diagrams_dir.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("unihub").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = parse(&["config"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.exports_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.diagrams_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = parse(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "true",
            "--out-dir",
            "/exports",
            "--reports-dir",
            "/reports",
            "--diagrams-dir",
            "/diagrams",
            "config",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.exports_dir, Some("/exports".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
        assert_eq!(overrides.diagrams_dir, Some("/diagrams".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = parse(&["--config-out-dir", "/long/out", "--out-dir", "/short/out", "config"]);
        assert_eq!(
            cli.to_config_overrides().exports_dir,
            Some("/short/out".to_string())
        );

        let cli = parse(&["--config-out-dir", "/long/out", "config"]);
        assert_eq!(
            cli.to_config_overrides().exports_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_report_command() {
        let cli = parse(&["report", "records.csv", "--student", "EN001", "-f", "md"]);
        match cli.command {
            Command::Report {
                input_file,
                student,
                format,
                semester,
                ..
            } => {
                assert_eq!(input_file, PathBuf::from("records.csv"));
                assert_eq!(student, "EN001");
                assert_eq!(format, "md");
                assert!(semester.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_diagram_defaults() {
        match parse(&["diagram"]).command {
            Command::Diagram {
                kind,
                format,
                output,
            } => {
                assert_eq!(kind, DiagramKind::All);
                assert_eq!(format, DiagramFormat::Svg);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_calc_gpa_entries() {
        match parse(&["calc", "gpa", "9:4", "8:3"]).command {
            Command::Calc {
                subcommand: CalcSubcommand::Gpa { entries },
            } => assert_eq!(entries, vec!["9:4", "8:3"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_summary_requires_files() {
        let result = Cli::try_parse_from(["unihub", "summary"]);
        assert!(result.is_err());
    }
}
