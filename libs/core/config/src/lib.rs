pub mod tracing;

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Invalid value for '{key}': {details}")]
    InvalidValue { key: String, details: String },

    #[error("Configured edition '{configured}' does not match the compiled edition '{compiled}'")]
    EditionMismatch { configured: Edition, compiled: Edition },
}

/// Application environment (dev = local/kind, prod = full k8s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Product edition, fixed at build time.
///
/// The hosted product (`Cloud`) and the self-hosted build (`Community`) ship
/// different email content. Which one a binary is depends only on whether it was
/// compiled with the `community` feature; runtime configuration can assert the
/// expected edition but never switch it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edition {
    Cloud,
    Community,
}

impl Edition {
    /// Edition this binary was compiled as.
    pub const BUILD: Edition = if cfg!(feature = "community") {
        Edition::Community
    } else {
        Edition::Cloud
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Cloud => "cloud",
            Edition::Community => "community",
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, Edition::Cloud)
    }

    pub fn is_community(&self) -> bool {
        matches!(self, Edition::Community)
    }

    /// Reads `key` and checks it against [`Edition::BUILD`].
    ///
    /// An unset variable means "whatever was compiled in".
    pub fn verify_env(key: &str) -> Result<Self, ConfigError> {
        match env::var(key) {
            Ok(raw) => {
                let configured = parse_env::<Edition>(key, &raw)?;
                if configured != Self::BUILD {
                    return Err(ConfigError::EditionMismatch {
                        configured,
                        compiled: Self::BUILD,
                    });
                }
                Ok(configured)
            }
            Err(_) => Ok(Self::BUILD),
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud" | "ee" => Ok(Edition::Cloud),
            "community" | "ce" => Ok(Edition::Community),
            other => Err(format!("unknown edition '{}'", other)),
        }
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse a raw value read from `key`, mapping failures to [`ConfigError::ParseError`].
pub fn parse_env<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
        key: key.to_string(),
        details: e.to_string(),
    })
}
