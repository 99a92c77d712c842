// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses, non-empty paths, and
//! plausible mail addresses.

use crate::diagnostic::ConfigError;
use crate::model::PostboxConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PostboxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.service.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "service.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.service.log_level
            ),
        });
    }

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.smtp.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "smtp.host must not be empty".to_string(),
        });
    }

    if config.smtp.port == 0 {
        errors.push(ConfigError::Validation {
            message: "smtp.port must be non-zero".to_string(),
        });
    }

    if !config.smtp.from_address.contains('@') {
        errors.push(ConfigError::Validation {
            message: format!(
                "smtp.from_address `{}` is not a mail address",
                config.smtp.from_address
            ),
        });
    }

    if config.smtp.username.is_some() && config.smtp.password.is_none() {
        errors.push(ConfigError::Validation {
            message: "smtp.username is set but smtp.password is missing \
                      (set POSTBOX_SMTP_PASSWORD)"
                .to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PostboxConfig::default()).is_ok());
    }

    #[test]
    fn bad_log_level_is_rejected() {
        let mut config = PostboxConfig::default();
        config.service.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("log_level")));
    }

    #[test]
    fn empty_host_is_rejected() {
        let mut config = PostboxConfig::default();
        config.server.host = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("server.host")));
    }

    #[test]
    fn from_address_without_at_is_rejected() {
        let mut config = PostboxConfig::default();
        config.smtp.from_address = "not-an-address".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| e.to_string().contains("from_address"))
        );
    }

    #[test]
    fn username_without_password_is_rejected() {
        let mut config = PostboxConfig::default();
        config.smtp.username = Some("mailer".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("password")));
    }

    #[test]
    fn all_errors_are_collected_not_just_the_first() {
        let mut config = PostboxConfig::default();
        config.service.log_level = "loud".to_string();
        config.storage.database_path = String::new();
        config.smtp.from_address = "nope".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
