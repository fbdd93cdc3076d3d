//! 配置值验证模块
//!
//! 启动前检查静态配置，任何一项不合法都拒绝启动。

use super::AppConfig;
use crate::errors::{IpCountryError, Result};

const LOG_FORMATS: [&str; 2] = ["text", "json"];

pub fn validate_config(config: &AppConfig) -> Result<()> {
    validate_rps(config.rate_limit.rps)?;

    if config.server.port == 0 {
        return Err(IpCountryError::config("server.port must be between 1 and 65535"));
    }

    if config.datastore.file.trim().is_empty() {
        return Err(IpCountryError::config("datastore.file must not be empty"));
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        return Err(IpCountryError::config(format!(
            "Invalid logging.format: '{}'. Valid: {}",
            config.logging.format,
            LOG_FORMATS.join(", ")
        )));
    }

    Ok(())
}

/// The limit must be a positive, finite number of requests per second.
pub fn validate_rps(rps: f64) -> Result<()> {
    if !rps.is_finite() || rps <= 0.0 {
        return Err(IpCountryError::config(format!(
            "rate_limit.rps must be positive, got: {}",
            rps
        )));
    }
    Ok(())
}
