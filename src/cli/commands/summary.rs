//! Summary command handler

use logger::{error, info};
use unihub::config::Config;
use unihub::core::{records::parse_records_csv, summary_export};
use std::path::{Path, PathBuf};

/// Run the summary command for one or more input files.
///
/// # Arguments
/// * `input_files` - Paths to records CSV files
/// * `output_files` - Optional output paths; must match inputs 1:1 when provided
/// * `semester` - Semester to summarise, or each student's current one
/// * `config` - Configuration containing the exports directory and thresholds
/// * `verbose` - Whether to print the per-student table
pub fn run(
    input_files: &[PathBuf],
    output_files: &[PathBuf],
    semester: Option<u32>,
    config: &Config,
    verbose: bool,
) {
    if input_files.is_empty() {
        eprintln!("✗ No input files provided.");
        return;
    }

    if !output_files.is_empty() && output_files.len() != input_files.len() {
        eprintln!(
            "✗ When using -o/--output, provide one output path per input file ({} inputs, {} outputs).",
            input_files.len(),
            output_files.len()
        );
        return;
    }

    for (idx, input_file) in input_files.iter().enumerate() {
        let output_file = output_files.get(idx).map(PathBuf::as_path);
        if let Err(err) = export_single(input_file, output_file, semester, config, verbose) {
            error!("Summary failed for {}: {err}", input_file.display());
            eprintln!("{err}");
        }
    }
}

fn export_single(
    input_file: &Path,
    output_file: Option<&Path>,
    semester: Option<u32>,
    config: &Config,
    verbose: bool,
) -> Result<(), String> {
    let university = parse_records_csv(input_file).map_err(|e| {
        error!("Failed to load records {}: {e}", input_file.display());
        format!("✗ Failed to load {}: {e}", input_file.display())
    })?;

    if verbose {
        println!("✓ Records loaded successfully from: {}", input_file.display());
    } else {
        info!("Records loaded: {}", input_file.display());
    }

    let final_output_path: PathBuf = if let Some(output) = output_file {
        output.to_path_buf()
    } else {
        let out_dir = PathBuf::from(&config.paths.exports_dir);
        std::fs::create_dir_all(&out_dir).map_err(|e| {
            format!(
                "✗ Failed to create output directory {}: {e}",
                out_dir.display()
            )
        })?;

        let filename = input_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("records")
            .to_string();
        out_dir.join(format!("{filename}_summary.csv"))
    };

    let options = config.summary_options(semester);
    match summary_export::export_summary_csv(&university, &options, &final_output_path) {
        Ok(summary) => {
            println!("✓ Summary exported to: {}", final_output_path.display());
            info!("Exported student summary to: {}", final_output_path.display());

            if verbose {
                println!(
                    "\n=== {} ({}) ===",
                    university.name,
                    if university.academic_year.is_empty() {
                        "-"
                    } else {
                        university.academic_year.as_str()
                    }
                );
                println!("Students: {}", summary.student_count);
                println!("Mean GPA: {:.2}", summary.mean_gpa);
                println!(
                    "Below attendance warning ({}%): {}",
                    options.policy.warning, summary.below_warning
                );
                for row in &summary.rows {
                    println!(
                        "  {:<12} {:<24} GPA {:>5.2}  attendance {:>6.2}% ({})",
                        row.enrollment, row.name, row.cumulative_gpa, row.attendance, row.band
                    );
                }
            }
            Ok(())
        }
        Err(e) => Err(format!(
            "✗ Failed to export summary to {}: {e}",
            final_output_path.display()
        )),
    }
}
