//! Tests for the verbose printer and the file sink.

use logger::{enable_verbose, error, info, is_verbose_enabled, verbose, warn};

#[cfg(feature = "verbose")]
#[test]
fn verbose_respects_runtime_flag() {
    verbose!("This should not appear");

    enable_verbose();
    assert!(is_verbose_enabled());
    verbose!("This should appear: verbose test {}", 42);
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_stamped_lines() {
    use logger::{close_file_logging, init_file_logging, set_level, Level};
    use std::fs;

    let dir = std::env::temp_dir().join(format!("unihub_logger_{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    let log_path = dir.join("unihub.log");
    let _ = fs::remove_file(&log_path);

    set_level(Level::Info);
    assert!(init_file_logging(&log_path));

    info!("Test info message");
    warn!("Test warning message");
    error!("Test error message");

    enable_verbose();
    verbose!("This verbose message should NOT be in the file");

    close_file_logging();

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] Test info message"));
    assert!(contents.contains("[WARN] Test warning message"));
    assert!(contents.contains("[ERROR] Test error message"));
    assert!(!contents.contains("verbose message"));

    // Every line starts with a date stamp
    for line in contents.lines() {
        assert!(line.chars().take(4).all(|c| c.is_ascii_digit()), "{line}");
    }

    let _ = fs::remove_dir_all(&dir);
}
