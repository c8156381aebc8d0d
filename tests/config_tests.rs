//! Integration tests for the `[academics]` policy and path configuration

use std::fs;
use tempfile::TempDir;
use unihub::config::{Config, ConfigError, ConfigOverrides, KEYS};
use unihub::core::academics::AttendanceBand;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_default_attendance_policy() {
    let config = Config::from_defaults();
    let policy = config.attendance_policy();

    assert_close(policy.good, 75.0);
    assert_close(policy.warning, 65.0);
    assert_eq!(policy.band(75.0), AttendanceBand::Warning);
    assert_eq!(policy.band(75.5), AttendanceBand::Good);

    let options = config.summary_options(Some(4));
    assert_eq!(options.semester, Some(4));
    assert_eq!(options.notification_limit, 5);
    assert_eq!(options.policy, policy);
}

#[test]
fn test_academics_section_is_optional() {
    let config = Config::from_toml("[logging]\nlevel = \"error\"\n").expect("parse config");

    assert_eq!(config.logging.level, "error");
    assert_close(config.academics.attendance_good, 75.0);
    assert_close(config.academics.attendance_warning, 65.0);
    assert_eq!(config.academics.notification_limit, 5);
}

#[test]
fn test_custom_thresholds_drive_bands() {
    let toml_str = r"
[logging]
level = 'warn'

[academics]
attendance_good = 85.0
attendance_warning = 75.0
notification_limit = 2
";
    let config = Config::from_toml(toml_str).expect("parse config");
    let policy = config.attendance_policy();

    assert_eq!(policy.band(80.0), AttendanceBand::Warning);
    assert_eq!(policy.band(74.99), AttendanceBand::Critical);
    assert_eq!(config.summary_options(None).notification_limit, 2);
}

#[test]
fn test_unihub_variable_expands_in_paths() {
    let toml_str = r#"
[logging]
file = "$UNIHUB/unihub.log"

[paths]
exports_dir = "$UNIHUB/exports"
reports_dir = "./reports"
"#;
    let config = Config::from_toml(toml_str).expect("parse config");
    let home = Config::get_unihub_dir();
    let home = home.to_string_lossy();

    assert!(config.paths.exports_dir.starts_with(&*home));
    assert!(config.paths.exports_dir.ends_with("exports"));
    assert!(config.logging.file.ends_with("unihub.log"));
    assert!(!config.logging.file.contains("$UNIHUB"));
    assert_eq!(config.paths.reports_dir, "./reports");
}

#[test]
fn test_threshold_ranges_track_each_other() {
    let mut config = Config::from_defaults();

    assert_eq!(config.allowed_range("attendance_good"), Some((65.0, 100.0)));
    assert_eq!(config.allowed_range("attendance-warning"), Some((0.0, 75.0)));
    assert_eq!(config.allowed_range("notification_limit"), None);

    config.set("attendance_good", "90").expect("raise good");
    assert_eq!(config.allowed_range("attendance_warning"), Some((0.0, 90.0)));
    config.set("attendance_warning", "80").expect("raise warning");
    assert_eq!(config.allowed_range("attendance_good"), Some((80.0, 100.0)));
}

#[test]
fn test_threshold_rejections_name_key_and_range() {
    let mut config = Config::from_defaults();

    let err = config.set("attendance_warning", "80").unwrap_err();
    assert_eq!(
        err,
        ConfigError::OutOfRange {
            key: "attendance_warning",
            value: 80.0,
            min: 0.0,
            max: 75.0,
        }
    );
    assert_eq!(
        err.to_string(),
        "'attendance_warning' must be between 0 and 75, got 80"
    );

    let err = config.set("attendance-good", "101").unwrap_err();
    assert_eq!(err.key(), "attendance_good");
    assert_eq!(
        err,
        ConfigError::OutOfRange {
            key: "attendance_good",
            value: 101.0,
            min: 65.0,
            max: 100.0,
        }
    );

    let err = config.set("attendance_good", "lots").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "attendance_good", .. }));

    // Rejected values leave the policy untouched
    assert_close(config.academics.attendance_good, 75.0);
    assert_close(config.academics.attendance_warning, 65.0);
}

#[test]
fn test_notification_limit_and_logging_values() {
    let mut config = Config::from_defaults();

    config.set("notification-limit", "8").expect("set limit");
    assert_eq!(config.get("notification_limit").as_deref(), Some("8"));
    assert!(matches!(
        config.set("notification_limit", "-1"),
        Err(ConfigError::InvalidValue { .. })
    ));

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    config.set("verbose", "true").expect("set verbose");
    assert!(config.logging.verbose);
}

#[test]
fn test_unknown_keys() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    assert!(config.get("colour").is_none());
    assert_eq!(
        config.set("colour", "red"),
        Err(ConfigError::UnknownKey("colour".to_string()))
    );
    assert!(config.unset("colour", &defaults).is_err());

    for key in KEYS {
        assert!(config.get(key).is_some(), "{key} should be readable");
    }
}

#[test]
fn test_unset_threshold_respects_other_threshold() {
    let defaults = Config::from_defaults();
    let mut config = Config::from_defaults();

    config.set("attendance_good", "95").expect("raise good");
    config.set("attendance_warning", "85").expect("raise warning");

    // Restoring good to 75 would put it below the warning threshold of 85
    let err = config.unset("attendance_good", &defaults).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { key: "attendance_good", .. }));

    config.unset("attendance_warning", &defaults).expect("restore warning");
    config.unset("attendance_good", &defaults).expect("restore good");
    assert_eq!(config.attendance_policy(), defaults.attendance_policy());
}

#[test]
fn test_policy_survives_toml_round_trip() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_file = temp_dir.path().join("config.toml");

    let mut config = Config::from_defaults();
    config.set("attendance_good", "80").expect("set good");
    config.set("notification_limit", "3").expect("set limit");
    config.set("reports_dir", "./term_reports").expect("set dir");

    let toml_str = toml::to_string_pretty(&config).expect("serialize");
    fs::write(&config_file, toml_str).expect("write config");

    let content = fs::read_to_string(&config_file).expect("read config");
    let loaded = Config::from_toml(&content).expect("parse config");

    assert_eq!(loaded.attendance_policy(), config.attendance_policy());
    assert_eq!(loaded.academics.notification_limit, 3);
    assert_eq!(loaded.paths.reports_dir, "./term_reports");
}

#[test]
fn test_merge_defaults_fills_new_directories() {
    let toml_str = r#"
[logging]
level = "info"
file = "/var/log/unihub.log"
verbose = false

[paths]
exports_dir = "./exports"
reports_dir = ""
"#;
    let mut config = Config::from_toml(toml_str).expect("parse config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
    assert_eq!(config.paths.diagrams_dir, defaults.paths.diagrams_dir);
    assert_eq!(config.paths.exports_dir, "./exports");
    assert_eq!(config.logging.file, "/var/log/unihub.log");
}

#[test]
fn test_cli_overrides_only_touch_given_paths() {
    let mut config = Config::from_defaults();
    let diagrams_before = config.paths.diagrams_dir.clone();

    config.apply_overrides(&ConfigOverrides {
        reports_dir: Some("./out/reports".to_string()),
        exports_dir: Some("./out/exports".to_string()),
        ..Default::default()
    });

    assert_eq!(config.paths.reports_dir, "./out/reports");
    assert_eq!(config.paths.exports_dir, "./out/exports");
    assert_eq!(config.paths.diagrams_dir, diagrams_before);
    assert_close(config.academics.attendance_good, 75.0);
}

#[test]
fn test_display_lists_academics_section() {
    let display = Config::from_defaults().to_string();

    assert!(display.contains("[academics]"));
    assert!(display.contains("attendance_good = 75"));
    assert!(display.contains("attendance_warning = 65"));
    assert!(display.contains("notification_limit = 5"));
}
