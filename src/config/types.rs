//! Configuration record types.
//!
//! Field names on the wire follow the frontend's environment object:
//! `apiServerUrl`, `auth.clientId`, `auth.callbackURL` and so on.

use crate::environment::Environment;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Packaged profiles, embedded at build time from `config/environments/`.
pub mod embedded {
    pub const DEVELOPMENT: &str = include_str!("../../config/environments/development.yaml");
    pub const PRODUCTION: &str = include_str!("../../config/environments/production.yaml");
}

/// Configuration record for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Whether this record describes a production deployment.
    pub production: bool,

    /// Base URL of the backend API (scheme, host and port).
    pub api_server_url: String,

    /// Identity-provider settings.
    #[serde(alias = "auth0")]
    pub auth: AuthConfig,
}

/// Identity-provider (OAuth/OIDC) settings for a public client.
///
/// Unknown keys are rejected, so a client secret cannot be smuggled into
/// a frontend profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Hostname of the identity-provider tenant.
    #[serde(alias = "url")]
    pub domain: String,

    /// Identifier of the API tokens are requested for.
    pub audience: String,

    /// Public identifier assigned to this application.
    #[serde(rename = "clientId")]
    pub client_id: String,

    /// Where the identity provider redirects after login.
    #[serde(rename = "callbackURL")]
    pub callback_url: String,
}

/// Wire paths of every field, in declaration order.
pub const FIELD_PATHS: [&str; 6] = [
    "production",
    "apiServerUrl",
    "auth.domain",
    "auth.audience",
    "auth.clientId",
    "auth.callbackURL",
];

impl EnvironmentConfig {
    /// Raw YAML of the packaged profile for `env`.
    pub fn embedded_source(env: Environment) -> &'static str {
        match env {
            Environment::Development => embedded::DEVELOPMENT,
            Environment::Production => embedded::PRODUCTION,
        }
    }

    /// Parse the packaged profile for `env` without any overrides.
    pub fn embedded(env: Environment) -> ConfigResult<Self> {
        Self::from_yaml(Self::embedded_source(env), &format!("embedded {} profile", env))
    }

    /// Parse a record from YAML. `source` names the input in error messages.
    pub fn from_yaml(content: &str, source: &str) -> ConfigResult<Self> {
        let value: serde_json::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::parse(source, e))?;
        Self::from_value(value, source)
    }

    /// Build a record from a merged JSON value.
    ///
    /// Absent fields become `ConfigurationMissing` and fields of the wrong
    /// type `ConfigurationInvalid`, both with the field's path, rather than
    /// a generic deserialization error.
    pub fn from_value(value: serde_json::Value, source: &str) -> ConfigResult<Self> {
        for path in FIELD_PATHS {
            let Some(field) = lookup(&value, path).filter(|v| !v.is_null()) else {
                return Err(ConfigError::missing_field(path));
            };
            let (well_typed, expected) = match path {
                "production" => (field.is_boolean(), "a boolean"),
                _ => (field.is_string(), "a string"),
            };
            if !well_typed {
                return Err(ConfigError::invalid_value(
                    path,
                    format!("{} must be {}, got {}", path, expected, field),
                ));
            }
        }
        serde_json::from_value(value).map_err(|e| ConfigError::parse(source, e))
    }

    /// Look up a field by its wire path and render it as a string.
    pub fn field(&self, path: &str) -> Option<String> {
        let value = match path {
            "production" => self.production.to_string(),
            "apiServerUrl" => self.api_server_url.clone(),
            "auth.domain" => self.auth.domain.clone(),
            "auth.audience" => self.auth.audience.clone(),
            "auth.clientId" => self.auth.client_id.clone(),
            "auth.callbackURL" => self.auth.callback_url.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// Resolve a dotted path in a JSON value, honoring the `auth0`/`url` aliases.
fn lookup<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.').try_fold(value, |node, key| {
        let alias = match key {
            "auth" => Some("auth0"),
            "domain" => Some("url"),
            _ => None,
        };
        node.get(key).or_else(|| alias.and_then(|a| node.get(a)))
    })
}
