//! Record validation.
//!
//! Validation collects every problem in a record instead of stopping at the
//! first, so `app-env validate` can report a broken profile in one pass.

use super::types::EnvironmentConfig;
use crate::environment::Environment;
use crate::error::{ConfigError, ConfigResult};
use regex_lite::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use url::{Host, Url};

/// Maximum length of a DNS hostname.
const MAX_HOSTNAME_LEN: usize = 253;

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("valid label regex")
    })
}

/// Outcome of validating one record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub environment: Option<Environment>,
    pub errors: Vec<ConfigError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into a `Result`, surfacing the first error.
    pub fn check(self) -> ConfigResult<()> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn push(&mut self, err: ConfigError) {
        self.errors.push(err);
    }
}

impl EnvironmentConfig {
    /// Validate this record as the profile for `env`.
    pub fn validate(&self, env: Environment) -> ValidationReport {
        let mut report = ValidationReport {
            environment: Some(env),
            errors: Vec::new(),
        };

        if self.production != env.is_production() {
            report.push(ConfigError::invalid_value(
                "production",
                format!(
                    "production is {} but the {} environment requires {}",
                    self.production,
                    env,
                    env.is_production()
                ),
            ));
        }

        if let Err(e) = check_absolute_url("apiServerUrl", &self.api_server_url) {
            report.push(e);
        }
        if let Err(e) = check_hostname("auth.domain", &self.auth.domain) {
            report.push(e);
        }
        if let Err(e) = check_non_empty("auth.audience", &self.auth.audience) {
            report.push(e);
        }
        if let Err(e) = check_client_id("auth.clientId", &self.auth.client_id) {
            report.push(e);
        }
        if let Err(e) = check_absolute_url("auth.callbackURL", &self.auth.callback_url) {
            report.push(e);
        }

        report
    }
}

fn check_non_empty<'a>(field: &str, value: &'a str) -> ConfigResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::missing_field(field));
    }
    if trimmed.len() != value.len() {
        return Err(ConfigError::invalid_value(
            field,
            format!("{} has leading or trailing whitespace", field),
        ));
    }
    Ok(value)
}

/// An absolute URL needs a scheme and an authority (`http://host[:port]`).
pub fn check_absolute_url(field: &str, value: &str) -> ConfigResult<Url> {
    let value = check_non_empty(field, value)?;
    let url = Url::parse(value).map_err(|e| {
        ConfigError::invalid_value(field, format!("{} is not a valid absolute URL", field))
            .with_details(e.to_string())
    })?;
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(ConfigError::invalid_value(
            field,
            format!("{} must include a host, got '{}'", field, value),
        ));
    }
    Ok(url)
}

/// A bare DNS hostname: no scheme, port, path or IP literal.
pub fn check_hostname(field: &str, value: &str) -> ConfigResult<()> {
    let value = check_non_empty(field, value)?;
    let invalid = |reason: String| ConfigError::invalid_value(field, reason);

    match Host::parse(value) {
        Ok(Host::Domain(_)) => {}
        Ok(Host::Ipv4(_)) | Ok(Host::Ipv6(_)) => {
            return Err(invalid(format!(
                "{} must be a hostname, not an IP address",
                field
            )));
        }
        Err(e) => {
            return Err(invalid(format!("{} is not a valid hostname", field))
                .with_details(e.to_string()));
        }
    }

    let name = value.strip_suffix('.').unwrap_or(value);
    if name.len() > MAX_HOSTNAME_LEN {
        return Err(invalid(format!(
            "{} exceeds {} characters",
            field, MAX_HOSTNAME_LEN
        )));
    }
    if let Some(label) = name.split('.').find(|l| !label_regex().is_match(l)) {
        return Err(invalid(format!(
            "{} has an invalid label '{}'",
            field, label
        )));
    }
    Ok(())
}

fn check_client_id(field: &str, value: &str) -> ConfigResult<()> {
    let value = check_non_empty(field, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::invalid_value(
            field,
            format!("{} must not contain whitespace", field),
        ));
    }
    Ok(())
}
