use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the defaults reproduce the timings the store
/// directory page was observed to need.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("STOREDIR_LOG_LEVEL", "info");
    let directory_url = or_default(
        "STOREDIR_DIRECTORY_URL",
        "https://corporate.lcwaikiki.com/magazalar",
    );
    let webdriver_url = or_default("STOREDIR_WEBDRIVER_URL", "http://localhost:9515");
    let headless = parse_bool("STOREDIR_HEADLESS", &or_default("STOREDIR_HEADLESS", "false"))?;

    let output_dir = match lookup("STOREDIR_OUTPUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => default_output_dir(lookup("HOME").ok()),
    };

    let element_wait_secs = parse_u64("STOREDIR_ELEMENT_WAIT_SECS", "10")?;
    let country_settle_ms = parse_u64("STOREDIR_COUNTRY_SETTLE_MS", "1000")?;
    let item_settle_ms = parse_u64("STOREDIR_ITEM_SETTLE_MS", "200")?;
    let scroll_pause_ms = parse_u64("STOREDIR_SCROLL_PAUSE_MS", "800")?;
    let scroll_step_px = parse_u32("STOREDIR_SCROLL_STEP_PX", "500")?;
    let max_scroll_attempts = parse_u32("STOREDIR_MAX_SCROLL_ATTEMPTS", "10")?;

    Ok(AppConfig {
        log_level,
        directory_url,
        webdriver_url,
        headless,
        output_dir,
        element_wait_secs,
        country_settle_ms,
        item_settle_ms,
        scroll_pause_ms,
        scroll_step_px,
        max_scroll_attempts,
    })
}

/// Accepts `true`/`false`/`1`/`0`/`yes`/`no`, case-insensitive.
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}

/// The desktop of the current user, or the working directory when `HOME` is unset.
fn default_output_dir(home: Option<String>) -> PathBuf {
    home.map_or_else(|| PathBuf::from("."), |h| PathBuf::from(h).join("Desktop"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
