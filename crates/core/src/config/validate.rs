use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Source URL is a non-empty http(s) URL
/// - Source timeout, when set, is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Source validation
    let url = config.source.url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError(
            "source.url cannot be empty".to_string(),
        ));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "source.url must be an http or https URL, got {}",
            url
        )));
    }
    if config.source.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "source.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
