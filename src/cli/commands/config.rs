//! Config command handler
//!
//! Shows and edits `config.toml`. Changes to the attendance thresholds are
//! echoed back as the resulting Good / Warning / Critical bands.

use crate::args::ConfigSubcommand;
use logger::{error, info};
use std::io::{self, Write};
use unihub::config::{Config, ConfigError, KEYS};
use unihub::core::academics::AttendancePolicy;

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            update(config, &key, |c| c.set(&key, &value), &format!("Set {key} = {value}"))
        }
        Some(ConfigSubcommand::Unset { key }) => update(
            config,
            &key,
            |c| c.unset(&key, defaults),
            &format!("Reset {key} to default"),
        ),
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(message) = result {
        eprintln!("✗ {message}");
        std::process::exit(1);
    }
}

/// Attendance bands as printed under the configuration
pub fn band_lines(policy: &AttendancePolicy) -> [String; 3] {
    [
        format!("Good      above {}%", policy.good),
        format!("Warning   {}% to {}%", policy.warning, policy.good),
        format!("Critical  below {}%", policy.warning),
    ]
}

fn print_bands(policy: &AttendancePolicy) {
    println!("Attendance bands:");
    for line in band_lines(policy) {
        println!("  {line}");
    }
}

fn show_all(config: &Config) {
    println!("\n=== Configuration ===\n");
    print!("{config}");
    println!();
    print_bands(&config.attendance_policy());
}

fn show_key(config: &Config, key: &str) -> Result<(), String> {
    let value = config
        .get(key)
        .ok_or_else(|| explain(config, &ConfigError::UnknownKey(key.to_string())))?;
    println!("{value}");
    if let Some((min, max)) = config.allowed_range(key) {
        println!("  (allowed {min} to {max})");
    }
    Ok(())
}

/// Human-readable message for a rejected key or value
///
/// Threshold errors carry the range the key may take right now; unknown keys
/// list the keys that exist.
pub fn explain(config: &Config, err: &ConfigError) -> String {
    match err {
        ConfigError::UnknownKey(_) => format!("{err}. Known keys: {}", KEYS.join(", ")),
        ConfigError::OutOfRange { key, .. } => {
            let (min, max) = config.allowed_range(key).unwrap_or((0.0, 100.0));
            format!("{err}. Current bands allow {key} in [{min}, {max}]")
        }
        ConfigError::InvalidValue { .. } => err.to_string(),
    }
}

fn update<F>(config: &mut Config, key: &str, change: F, done: &str) -> Result<(), String>
where
    F: FnOnce(&mut Config) -> Result<(), ConfigError>,
{
    let before = config.attendance_policy();
    change(config).map_err(|e| {
        error!("config change to '{}' rejected: {e}", e.key());
        explain(config, &e)
    })?;

    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    info!("config key '{key}' saved");
    println!("✓ {done}");

    let after = config.attendance_policy();
    if after != before {
        print_bands(&after);
    }
    Ok(())
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Reset config to defaults? Thresholds return to their defaults too. (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    if matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
        print_bands(&Config::from_defaults().attendance_policy());
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_lines_follow_thresholds() {
        let lines = band_lines(&AttendancePolicy {
            good: 80.0,
            warning: 70.0,
        });
        assert_eq!(lines[0], "Good      above 80%");
        assert_eq!(lines[1], "Warning   70% to 80%");
        assert_eq!(lines[2], "Critical  below 70%");
    }

    #[test]
    fn test_explain_names_key_and_range() {
        let mut config = Config::from_defaults();
        let err = config.set("attendance_warning", "90").unwrap_err();
        let message = explain(&config, &err);
        assert!(message.contains("attendance_warning"), "{message}");
        assert!(message.contains("[0, 75]"), "{message}");
    }

    #[test]
    fn test_explain_lists_known_keys() {
        let config = Config::from_defaults();
        let message = explain(&config, &ConfigError::UnknownKey("colour".into()));
        assert!(message.contains("'colour'"));
        assert!(message.contains("notification_limit"));
    }
}
