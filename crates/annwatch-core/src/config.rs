use crate::app_config::{
    AppConfig, DEFAULT_API_URL, DEFAULT_PDF_BASE_URL, DEFAULT_USER_AGENT, DEFAULT_WARMUP_URL,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
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
/// Returns `ConfigError` if a value cannot be parsed or fails validation.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let days_back = parse_u32("DAYS_BACK", "4")?;
    if days_back == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DAYS_BACK".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let output_dir = PathBuf::from(or_default("OUTPUT_DIR", "./output"));
    let rules_path = lookup("ANNWATCH_RULES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let log_level = or_default("ANNWATCH_LOG_LEVEL", "info");

    let api_url = or_default("ANNWATCH_API_URL", DEFAULT_API_URL);
    let pdf_base_url = or_default("ANNWATCH_PDF_BASE_URL", DEFAULT_PDF_BASE_URL);
    // An explicitly empty value disables the warm-up request.
    let warmup_url = Some(or_default("ANNWATCH_WARMUP_URL", DEFAULT_WARMUP_URL))
        .filter(|u| !u.trim().is_empty());

    let request_timeout_secs = parse_u64("ANNWATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ANNWATCH_USER_AGENT", DEFAULT_USER_AGENT);
    let request_delay_ms = parse_u64("ANNWATCH_REQUEST_DELAY_MS", "1000")?;
    let max_retries = parse_u32("ANNWATCH_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("ANNWATCH_RETRY_BACKOFF_BASE_SECS", "2")?;
    let max_pages = parse_u32("ANNWATCH_MAX_PAGES", "50")?;
    if max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ANNWATCH_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        days_back,
        output_dir,
        rules_path,
        log_level,
        api_url,
        pdf_base_url,
        warmup_url,
        request_timeout_secs,
        user_agent,
        request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        max_pages,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
