use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Load application configuration from environment variables already in the process.
///
/// `.env` files are not read here; the binary loads them once at startup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can feed a `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let parse_attempts = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let log_level = or_default("LIMOSCOUT_LOG_LEVEL", "info");
    let places_base_url = or_default("LIMOSCOUT_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let request_timeout_secs = parse_u64("LIMOSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("LIMOSCOUT_USER_AGENT", "limoscout/0.1 (places-collector)");
    let search_max_attempts = parse_attempts("LIMOSCOUT_SEARCH_MAX_ATTEMPTS", "5")?;
    let details_max_attempts = parse_attempts("LIMOSCOUT_DETAILS_MAX_ATTEMPTS", "3")?;
    let regions_path = lookup("LIMOSCOUT_REGIONS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        log_level,
        places_base_url,
        request_timeout_secs,
        user_agent,
        search_max_attempts,
        details_max_attempts,
        regions_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
