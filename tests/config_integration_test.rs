//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use debtwatch::config::{load_config, load_config_or_default};
use debtwatch::domain::DebtwatchError;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("DEBTWATCH_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DEBTWATCH_SERVER_BIND_ADDRESS");
    std::env::remove_var("DEBTWATCH_WORLDBANK_COUNTRY_CODE");
    std::env::remove_var("DEBTWATCH_CURATED_PATH");
    std::env::remove_var("DEBTWATCH_RECONCILIATION_ANNUAL_SUPERSEDE_MONTH");
    std::env::remove_var("DEBTWATCH_FALLBACK_POPULATION");
    std::env::remove_var("TEST_DEBTWATCH_DATA_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[server]
bind_address = "127.0.0.1:9090"
request_timeout_seconds = 15
shutdown_timeout_secs = 5

[worldbank]
base_url = "http://localhost:8000/v2"
country_code = "ROU"
timeout_seconds = 3
connect_timeout_seconds = 2
per_page = 50
max_pages = 3
history_start_year = 2000
snapshot_start_year = 2015
lookahead_years = 2

[worldbank.indicators]
external_debt = "DT.DOD.DECT.CD"
debt_pct_gdp = "GC.DOD.TOTL.GD.ZS"
gdp = "NY.GDP.MKTP.CD"
population = "SP.POP.TOTL"

[curated]
path = "/srv/debtwatch/monthly.json"

[fallback]
debt_usd = 190000000000
debt_eur = 176000000000
population = 19000000
year = 2024
month = 12

[currency]
eur_to_usd = 1.1
usd_to_eur = 0.91
usd_to_local = 4.6
eur_to_local = 4.97
local_code = "RON"

[reconciliation]
annual_supersede_month = 6
min_history_points = 3
backfill_points = 10
backfill_band = 0.1
population_decline = 0.99

[logging]
local_enabled = false
local_path = "/tmp/debtwatch"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.server.bind_address, "127.0.0.1:9090");
    assert_eq!(config.worldbank.country_code, "ROU");
    assert_eq!(config.worldbank.max_pages, 3);
    assert_eq!(config.curated.path, "/srv/debtwatch/monthly.json");
    assert_eq!(config.fallback.to_constant().unwrap().period.to_string(), "2024-12");
    assert_eq!(config.currency.local_code, "RON");
    assert_eq!(config.reconciliation.annual_supersede_month, 6);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_DEBTWATCH_DATA_DIR", "/data/releases");

    let file = write_config(
        r#"
[curated]
path = "${TEST_DEBTWATCH_DATA_DIR}/monthly-debt-data.json"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.curated.path, "/data/releases/monthly-debt-data.json");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[curated]
path = "${TEST_DEBTWATCH_DATA_DIR}/monthly.json"
"#,
    );

    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, DebtwatchError::Configuration(_)));
    assert!(err.to_string().contains("TEST_DEBTWATCH_DATA_DIR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("DEBTWATCH_WORLDBANK_COUNTRY_CODE", "SRB");
    std::env::set_var("DEBTWATCH_RECONCILIATION_ANNUAL_SUPERSEDE_MONTH", "10");
    std::env::set_var("DEBTWATCH_FALLBACK_POPULATION", "6600000");

    let file = write_config(
        r#"
[worldbank]
country_code = "BGR"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.worldbank.country_code, "SRB");
    assert_eq!(config.reconciliation.annual_supersede_month, 10);
    assert_eq!(config.fallback.population, 6_600_000);

    cleanup_env_vars();
}

#[test]
fn test_invalid_override_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("DEBTWATCH_SERVER_BIND_ADDRESS", "nowhere");

    let result = load_config_or_default("/nonexistent/debtwatch.toml");
    assert!(matches!(result, Err(DebtwatchError::Configuration(_))));

    cleanup_env_vars();
}

#[test]
fn test_missing_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_or_default("/nonexistent/debtwatch.toml").unwrap();
    assert_eq!(config.worldbank.country_code, "BGR");
    assert_eq!(config.fallback.debt_usd, 57_894_000_000.0);
    assert!(load_config("/nonexistent/debtwatch.toml").is_err());
}

#[test]
fn test_malformed_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[server\nbind_address = ");
    assert!(matches!(
        load_config(file.path()),
        Err(DebtwatchError::Configuration(_))
    ));
}

#[test]
fn test_invalid_rotation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[logging]
local_rotation = "weekly"
"#,
    );
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("local_rotation"));
}
