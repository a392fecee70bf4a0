use crate::app_config::AppConfig;
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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;

    let search_radius_m = parse_u32("PLATEFINDER_SEARCH_RADIUS_M", "5000")?;
    if search_radius_m == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLATEFINDER_SEARCH_RADIUS_M".to_string(),
            reason: "radius must be a positive number of meters".to_string(),
        });
    }

    let max_results = parse_usize("PLATEFINDER_MAX_RESULTS", "100")?;
    if max_results == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PLATEFINDER_MAX_RESULTS".to_string(),
            reason: "max results must be at least 1".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("PLATEFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let page_delay_ms = parse_u64("PLATEFINDER_PAGE_DELAY_MS", "2000")?;
    let max_concurrent_lookups = parse_usize("PLATEFINDER_MAX_CONCURRENT_LOOKUPS", "8")?;
    let photo_max_width = parse_u32("PLATEFINDER_PHOTO_MAX_WIDTH", "400")?;
    let log_level = or_default("PLATEFINDER_LOG_LEVEL", "info");

    Ok(AppConfig {
        places_api_key,
        search_radius_m,
        max_results,
        request_timeout_secs,
        page_delay_ms,
        max_concurrent_lookups,
        photo_max_width,
        log_level,
    })
}
