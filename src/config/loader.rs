//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DebtwatchConfig;
use crate::domain::errors::DebtwatchError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DebtwatchConfig
/// 4. Applies environment variable overrides (DEBTWATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use debtwatch::config::loader::load_config;
///
/// let config = load_config("debtwatch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DebtwatchConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DebtwatchError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DebtwatchError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from a file, or from defaults when the file is absent
///
/// Environment overrides and validation apply in both cases, so a container
/// can run with no file at all and only `DEBTWATCH_*` variables.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<DebtwatchConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::info!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    parse_config("")
}

/// Parses configuration text, applying substitution, overrides and validation
pub fn parse_config(contents: &str) -> Result<DebtwatchConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: DebtwatchConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DebtwatchError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| DebtwatchError::Configuration(e.to_string()))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DebtwatchError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Applies environment variable overrides using DEBTWATCH_* prefix
///
/// Environment variables follow the pattern: DEBTWATCH_<SECTION>_<KEY>
/// For example: DEBTWATCH_SERVER_BIND_ADDRESS, DEBTWATCH_WORLDBANK_COUNTRY_CODE
fn apply_env_overrides(config: &mut DebtwatchConfig) {
    // Application
    if let Ok(val) = std::env::var("DEBTWATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server
    if let Ok(val) = std::env::var("DEBTWATCH_SERVER_BIND_ADDRESS") {
        config.server.bind_address = val;
    }
    if let Some(secs) = env_parse("DEBTWATCH_SERVER_REQUEST_TIMEOUT_SECONDS") {
        config.server.request_timeout_seconds = secs;
    }

    // World Bank
    if let Ok(val) = std::env::var("DEBTWATCH_WORLDBANK_BASE_URL") {
        config.worldbank.base_url = val;
    }
    if let Ok(val) = std::env::var("DEBTWATCH_WORLDBANK_COUNTRY_CODE") {
        config.worldbank.country_code = val;
    }
    if let Some(secs) = env_parse("DEBTWATCH_WORLDBANK_TIMEOUT_SECONDS") {
        config.worldbank.timeout_seconds = secs;
    }
    if let Some(pages) = env_parse("DEBTWATCH_WORLDBANK_MAX_PAGES") {
        config.worldbank.max_pages = pages;
    }

    // Curated dataset
    if let Ok(val) = std::env::var("DEBTWATCH_CURATED_PATH") {
        config.curated.path = val;
    }

    // Fallback
    if let Some(debt) = env_parse("DEBTWATCH_FALLBACK_DEBT_USD") {
        config.fallback.debt_usd = debt;
    }
    if let Some(population) = env_parse("DEBTWATCH_FALLBACK_POPULATION") {
        config.fallback.population = population;
    }

    // Reconciliation
    if let Some(month) = env_parse("DEBTWATCH_RECONCILIATION_ANNUAL_SUPERSEDE_MONTH") {
        config.reconciliation.annual_supersede_month = month;
    }

    // Logging
    if let Ok(val) = std::env::var("DEBTWATCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("DEBTWATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
