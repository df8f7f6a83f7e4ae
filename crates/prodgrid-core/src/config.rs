use crate::app_config::{AppConfig, DEFAULT_LEGACY_QUERY_PATH, DEFAULT_MODERN_QUERY_PATH};
use crate::environment::Environment;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real process environment so it can be tested with a
/// plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let author_origin = parse_origin("PRODGRID_AUTHOR_ORIGIN", &require("PRODGRID_AUTHOR_ORIGIN")?)?;
    let publish_origin =
        parse_origin("PRODGRID_PUBLISH_ORIGIN", &require("PRODGRID_PUBLISH_ORIGIN")?)?;

    let legacy_query_path = parse_query_path(
        "PRODGRID_LEGACY_QUERY_PATH",
        &or_default("PRODGRID_LEGACY_QUERY_PATH", DEFAULT_LEGACY_QUERY_PATH),
    )?;
    let modern_query_path = parse_query_path(
        "PRODGRID_MODERN_QUERY_PATH",
        &or_default("PRODGRID_MODERN_QUERY_PATH", DEFAULT_MODERN_QUERY_PATH),
    )?;

    let env = lookup("PRODGRID_ENV")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_environment(&v))
        .transpose()?;

    let log_level = or_default("PRODGRID_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PRODGRID_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PRODGRID_USER_AGENT", "prodgrid/0.1 (product-grid)");

    Ok(AppConfig {
        author_origin,
        publish_origin,
        legacy_query_path,
        modern_query_path,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    s.parse::<Environment>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "PRODGRID_ENV".to_string(),
            reason,
        })
}

/// Validates an absolute `http`/`https` origin and strips any trailing slash.
fn parse_origin(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_query_path(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("query path \"{trimmed}\" must start with '/'"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
