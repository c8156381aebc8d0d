//! Command-line interface entry point for `UniHub`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use logger::{enable_debug, enable_verbose, info, init_file_logging, set_level, Level};
use unihub::config::Config;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    // Verbose: enable if CLI flag OR config has verbose=true
    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // Initialize file logging: CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Summary {
            input_files,
            output,
            semester,
            report,
        } => {
            commands::summary::run(&input_files, &output, semester, &config, verbose);

            if let Some(format) = report {
                commands::report::run_for_all(&input_files, &format, semester, &config);
            }
        }
        Command::Report {
            input_file,
            student,
            output,
            format,
            semester,
            pdf_converter,
        } => {
            commands::report::run(
                &commands::report::ReportRequest {
                    input_file: &input_file,
                    student: &student,
                    output_file: output.as_deref(),
                    format: &format,
                    semester,
                    pdf_converter: pdf_converter.as_deref(),
                },
                &config,
            );
        }
        Command::Diagram {
            kind,
            format,
            output,
        } => {
            commands::diagram::run(kind, format, output.as_deref(), &config);
        }
        Command::Schema { format, output } => {
            commands::schema::run(format, output.as_deref());
        }
        Command::Calc { subcommand } => {
            commands::calc::run(subcommand);
        }
    }
}
