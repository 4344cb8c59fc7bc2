use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default freshness window for cached datasets (30 minutes).
pub const DEFAULT_CACHE_TTL_MS: u64 = 30 * 60 * 1000;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SAFEMAP_ENV", "development"));
    let bind_addr = parse_addr("SAFEMAP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SAFEMAP_LOG_LEVEL", "info");
    let static_root = PathBuf::from(or_default("SAFEMAP_STATIC_ROOT", "./static"));

    let api_base_url = or_default("SAFEMAP_API_BASE_URL", "http://localhost:3000");
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(invalid(
            "SAFEMAP_API_BASE_URL",
            "must start with http:// or https://".to_string(),
        ));
    }

    let cache_dir = PathBuf::from(or_default("SAFEMAP_CACHE_DIR", "./.safemap-cache"));
    let cache_ttl_ms = parse_u64("SAFEMAP_CACHE_TTL_MS", &DEFAULT_CACHE_TTL_MS.to_string())?;
    let request_timeout_secs = parse_u64("SAFEMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SAFEMAP_USER_AGENT", "safemap/0.1 (public-safety)");

    let rate_limit_per_minute = parse_usize("SAFEMAP_RATE_LIMIT_PER_MINUTE", "120")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "SAFEMAP_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        static_root,
        api_base_url,
        cache_dir,
        cache_ttl_ms,
        request_timeout_secs,
        user_agent,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
