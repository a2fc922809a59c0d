//! Integration tests for logging functionality
//!
//! The global subscriber can be installed once per process, so everything
//! that initializes logging lives in a single test.

use debtwatch::config::LoggingConfig;
use debtwatch::domain::DebtwatchError;
use debtwatch::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "/var/log/debtwatch");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(matches!(result, Err(DebtwatchError::Configuration(_))));
}

#[test]
fn test_file_logging_creates_directory_and_installs_once() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(!log_path.exists());
    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    tracing::info!(source = "test", "written to the JSON file layer");

    // A second global subscriber cannot be installed
    let again = init_logging("info", &LoggingConfig::default());
    assert!(matches!(again, Err(DebtwatchError::Configuration(_))));

    drop(guard);
    let log_file = log_path.join("debtwatch.log");
    assert!(log_file.exists());
}
