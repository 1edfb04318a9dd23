//! Mailer configuration.

use core_config::{ConfigError, Edition, FromEnv, env_or_default};

/// Settings shared by every composed email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    /// `From` header of every email.
    pub from: String,
    /// Public base URL; the canonical product link and billing links derive from it.
    pub base_url: String,
    /// Product name used in subjects and signatures.
    pub product_name: String,
}

impl MailerConfig {
    /// Checks the settings once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.from.contains('@') {
            return Err(ConfigError::InvalidValue {
                key: "MAILER_FROM".to_string(),
                details: format!("'{}' has no email address", self.from),
            });
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                key: "BASE_URL".to_string(),
                details: format!("'{}' must be an http(s) URL", self.base_url),
            });
        }

        if self.product_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "PRODUCT_NAME".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl FromEnv for MailerConfig {
    /// Reads from environment variables with defaults:
    /// - MAILER_FROM: defaults to "Zerg <hello@zerg.dev>"
    /// - BASE_URL: defaults to "https://zerg.dev"
    /// - PRODUCT_NAME: defaults to "Zerg"
    /// - MAILER_EDITION: optional, must match the compiled edition when set
    fn from_env() -> Result<Self, ConfigError> {
        Edition::verify_env("MAILER_EDITION")?;

        let config = Self {
            from: env_or_default("MAILER_FROM", "Zerg <hello@zerg.dev>"),
            base_url: env_or_default("BASE_URL", "https://zerg.dev"),
            product_name: env_or_default("PRODUCT_NAME", "Zerg"),
        };
        config.validate()?;

        Ok(config)
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            from: "Zerg <hello@zerg.dev>".to_string(),
            base_url: "https://zerg.dev".to_string(),
            product_name: "Zerg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = ["MAILER_FROM", "BASE_URL", "PRODUCT_NAME", "MAILER_EDITION"];

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = MailerConfig::from_env().unwrap();
            assert_eq!(config, MailerConfig::default());
        });
    }

    #[test]
    fn test_from_env_custom_values() {
        temp_env::with_vars(
            [
                ("MAILER_FROM", Some("Ops <ops@example.com>")),
                ("BASE_URL", Some("http://localhost:8000")),
                ("PRODUCT_NAME", Some("Zerg Dev")),
                ("MAILER_EDITION", None),
            ],
            || {
                let config = MailerConfig::from_env().unwrap();
                assert_eq!(config.from, "Ops <ops@example.com>");
                assert_eq!(config.base_url, "http://localhost:8000");
                assert_eq!(config.product_name, "Zerg Dev");
            },
        );
    }

    #[test]
    fn test_from_env_rejects_other_edition() {
        let other = if Edition::BUILD.is_cloud() { "community" } else { "cloud" };
        temp_env::with_vars(
            [
                ("MAILER_FROM", None),
                ("BASE_URL", None),
                ("PRODUCT_NAME", None),
                ("MAILER_EDITION", Some(other)),
            ],
            || {
                let err = MailerConfig::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::EditionMismatch { .. }));
            },
        );
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let config = MailerConfig {
            base_url: "zerg.dev".to_string(),
            ..MailerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("BASE_URL"));
    }

    #[test]
    fn test_validate_rejects_sender_without_address() {
        let config = MailerConfig {
            from: "Zerg".to_string(),
            ..MailerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
