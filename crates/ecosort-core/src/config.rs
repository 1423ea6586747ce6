use std::fmt::Display;
use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::filters::{load_filter_rules, FilterRules};
use crate::ConfigError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "ecosort/0.1 (drop-off-discovery)";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 15;

/// Default search radius around the user, in meters.
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 10_000;

/// Default cap on live results handed to presentation.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

impl AppConfig {
    /// Filter rules from `filter_rules_path`, or the built-in defaults when unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured file cannot be read or is invalid.
    pub fn filter_rules(&self) -> Result<FilterRules, ConfigError> {
        match &self.filter_rules_path {
            Some(path) => load_filter_rules(path),
            None => Ok(FilterRules::default()),
        }
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let log_level = or_default("ECOSORT_LOG_LEVEL", "info");
    let overpass_url = or_default("ECOSORT_OVERPASS_URL", DEFAULT_OVERPASS_URL);
    if !(overpass_url.starts_with("http://") || overpass_url.starts_with("https://")) {
        return Err(invalid(
            "ECOSORT_OVERPASS_URL",
            format!("expected an http(s) URL, got '{overpass_url}'"),
        ));
    }

    let query_timeout_secs = parse_or(
        &lookup,
        "ECOSORT_QUERY_TIMEOUT_SECS",
        DEFAULT_QUERY_TIMEOUT_SECS,
    )?;
    let user_agent = or_default("ECOSORT_USER_AGENT", DEFAULT_USER_AGENT);

    let search_radius_m = parse_or(&lookup, "ECOSORT_SEARCH_RADIUS_M", DEFAULT_SEARCH_RADIUS_M)?;
    if search_radius_m == 0 {
        return Err(invalid(
            "ECOSORT_SEARCH_RADIUS_M",
            "must be greater than zero".to_string(),
        ));
    }

    let max_results = parse_or(&lookup, "ECOSORT_MAX_RESULTS", DEFAULT_MAX_RESULTS)?;
    if max_results == 0 {
        return Err(invalid(
            "ECOSORT_MAX_RESULTS",
            "must be greater than zero".to_string(),
        ));
    }

    let filter_rules_path = lookup("ECOSORT_FILTER_RULES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        overpass_url,
        query_timeout_secs,
        user_agent,
        search_radius_m,
        max_results,
        filter_rules_path,
    })
}

/// Parse `var` with `FromStr`, or return `default` when it is unset.
fn parse_or<F, T>(lookup: &F, var: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        Ok(raw) => raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
