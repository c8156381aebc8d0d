//! Calc command handler
//!
//! One-off GPA and attendance calculations without a records file.

use crate::args::CalcSubcommand;
use unihub::core::academics::{attendance_percentage, gpa};

/// Run a calc subcommand
pub fn run(subcommand: CalcSubcommand) {
    match subcommand {
        CalcSubcommand::Gpa { entries } => match parse_entries(&entries) {
            Ok(pairs) => println!("{:.2}", gpa(pairs)),
            Err(e) => {
                eprintln!("✗ {e}");
                std::process::exit(1);
            }
        },
        CalcSubcommand::Attendance { present, total } => {
            if present > total {
                logger::warn!("Present count {present} exceeds total {total}; clamping");
            }
            println!("{:.2}", attendance_percentage(present, total));
        }
    }
}

/// Parse `POINTS:CREDITS` pairs
fn parse_entries(entries: &[String]) -> Result<Vec<(f64, f64)>, String> {
    entries
        .iter()
        .map(|entry| {
            let (points, credits) = entry
                .split_once(':')
                .ok_or_else(|| format!("Expected POINTS:CREDITS, got '{entry}'"))?;
            let points: f64 = points
                .trim()
                .parse()
                .map_err(|_| format!("Invalid grade points in '{entry}'"))?;
            let credits: f64 = credits
                .trim()
                .parse()
                .map_err(|_| format!("Invalid credits in '{entry}'"))?;
            if points < 0.0 || credits < 0.0 {
                return Err(format!("Negative value in '{entry}'"));
            }
            Ok((points, credits))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries() {
        let pairs = parse_entries(&["9:4".to_string(), " 8 : 3 ".to_string()]).unwrap();
        assert_eq!(pairs, vec![(9.0, 4.0), (8.0, 3.0)]);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(parse_entries(&["9".to_string()]).is_err());
        assert!(parse_entries(&["A:4".to_string()]).is_err());
        assert!(parse_entries(&["9:-1".to_string()]).is_err());
    }
}
