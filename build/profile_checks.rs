//! Profile checks run by `build.rs` against the embedded profiles.
//!
//! Applies the same rules as `EnvironmentConfig::validate`, on the raw
//! YAML, so a profile the loader would reject never gets packaged.

use regex_lite::Regex;
use serde_yaml::Value;
use url::{Host, Url};

pub const ENVIRONMENTS: &[&str] = &["development", "production"];

const URL_FIELDS: &[&str] = &["apiServerUrl", "auth.callbackURL"];
const STRING_FIELDS: &[&str] = &[
    "apiServerUrl",
    "auth.domain",
    "auth.audience",
    "auth.clientId",
    "auth.callbackURL",
];
const MAX_HOSTNAME_LEN: usize = 253;

/// Check one profile. `name` is the environment the profile is packaged for.
pub fn check_profile(name: &str, profile: &Value) -> Result<(), String> {
    match profile.get("production").and_then(Value::as_bool) {
        Some(flag) if flag == (name == "production") => {}
        Some(flag) => return Err(format!("production is {flag} in the {name} profile")),
        None => return Err("production is required and must be a boolean".to_string()),
    }

    for field in STRING_FIELDS {
        let value = match lookup(profile, field) {
            None | Some(Value::Null) => return Err(format!("{field} is required")),
            Some(value) => value
                .as_str()
                .ok_or_else(|| format!("{field} must be a string"))?,
        };
        if value.trim().is_empty() {
            return Err(format!("{field} is required"));
        }
        if value.trim() != value {
            return Err(format!("{field} has leading or trailing whitespace"));
        }

        if URL_FIELDS.contains(field) {
            check_url(field, value)?;
        } else if *field == "auth.domain" {
            check_hostname(field, value)?;
        } else if *field == "auth.clientId" && value.chars().any(char::is_whitespace) {
            return Err(format!("{field} must not contain whitespace"));
        }
    }
    Ok(())
}

fn check_url(field: &str, value: &str) -> Result<(), String> {
    let url = Url::parse(value)
        .map_err(|e| format!("{field} is not a valid absolute URL, got '{value}': {e}"))?;
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(format!("{field} must include a host, got '{value}'"));
    }
    Ok(())
}

fn check_hostname(field: &str, value: &str) -> Result<(), String> {
    match Host::parse(value) {
        Ok(Host::Domain(_)) => {}
        Ok(_) => return Err(format!("{field} must be a hostname, not an IP address")),
        Err(e) => return Err(format!("{field} is not a valid hostname, got '{value}': {e}")),
    }

    let name = value.strip_suffix('.').unwrap_or(value);
    if name.len() > MAX_HOSTNAME_LEN {
        return Err(format!("{field} exceeds {MAX_HOSTNAME_LEN} characters"));
    }
    let label = Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .map_err(|e| e.to_string())?;
    if let Some(bad) = name.split('.').find(|l| !label.is_match(l)) {
        return Err(format!("{field} has an invalid label '{bad}'"));
    }
    Ok(())
}

fn lookup<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(value, |node, key| node.get(key))
}
