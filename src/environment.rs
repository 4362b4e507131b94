//! Deployment environments and the build-time selection between them.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Environment name captured by `build.rs` for this build artifact.
const COMPILED_ENVIRONMENT: &str = env!("APP_ENVIRONMENT");

/// Evaluated at compile time, so an unexpected name fails the build.
const COMPILED: Environment = Environment::from_compiled_name(COMPILED_ENVIRONMENT);

/// A named deployment target with its own configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Every environment that has a packaged profile.
    pub const ALL: [Environment; 2] = [Environment::Development, Environment::Production];

    /// The environment this binary was built for.
    ///
    /// Set by `APP_ENVIRONMENT` at build time; debug builds default to
    /// development and release builds to production.
    pub const fn compiled() -> Self {
        COMPILED
    }

    /// Map a name as emitted by `build.rs`. That script only ever emits the
    /// two canonical names, so anything else is a broken build setup.
    const fn from_compiled_name(name: &str) -> Self {
        match name.as_bytes() {
            b"development" => Environment::Development,
            b"production" => Environment::Production,
            _ => panic!("APP_ENVIRONMENT must be 'development' or 'production'"),
        }
    }

    /// Parse an environment name. Accepts the short forms `dev` and `prod`.
    pub fn parse(name: &str) -> ConfigResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::unknown_environment(name)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// File name of this environment's profile in every tier directory.
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
