//! Configuration loader with tier-based merging.
//!
//! Starts from the embedded profile of the selected environment, merges
//! project and user files over it field by field, applies environment
//! variable overrides, then validates the result once.

use super::merge::{deep_merge_all, overlay_from_pairs};
use super::types::EnvironmentConfig;
use crate::environment::Environment;
use crate::error::{ConfigError, ConfigResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Prefix shared by every variable the loader reads.
pub const ENV_PREFIX: &str = "APP_ENV_";

/// Explicit config file that replaces the project and user tiers.
pub const CONFIG_PATH_VAR: &str = "APP_ENV_CONFIG_PATH";
/// Project tier directory (default: `./app-env`).
pub const PROJECT_DIR_VAR: &str = "APP_ENV_PROJECT_DIR";
/// User tier directory (default: `~/.app-env`).
pub const USER_DIR_VAR: &str = "APP_ENV_USER_DIR";

/// Environment variables that override single fields, by wire path.
///
/// `production` is deliberately absent: it follows the environment.
pub const FIELD_OVERRIDES: [(&str, &str); 5] = [
    ("APP_ENV_API_SERVER_URL", "apiServerUrl"),
    ("APP_ENV_AUTH_DOMAIN", "auth.domain"),
    ("APP_ENV_AUTH_AUDIENCE", "auth.audience"),
    ("APP_ENV_AUTH_CLIENT_ID", "auth.clientId"),
    ("APP_ENV_AUTH_CALLBACK_URL", "auth.callbackURL"),
];

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Profile compiled into the binary
    Embedded = 0,
    /// Project-level directory (./app-env/)
    Project = 1,
    /// User-level directory (~/.app-env/)
    User = 2,
    /// File named by APP_ENV_CONFIG_PATH
    Explicit = 3,
    /// APP_ENV_* field overrides
    Environment = 4,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Embedded => write!(f, "embedded"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Explicit => write!(f, "explicit"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// A tier that contributed to the loaded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSource {
    pub tier: ConfigTier,
    /// File the tier was read from (None for embedded and variables)
    pub path: Option<PathBuf>,
}

/// Snapshot of the `APP_ENV_*` process variables.
///
/// Loading reads variables through this snapshot so tests can supply
/// their own without touching the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars(BTreeMap<String, String>);

impl EnvVars {
    /// Capture the loader's variables from the current process.
    pub fn from_process() -> Self {
        Self(
            std::env::vars()
                .filter(|(key, _)| key.starts_with(ENV_PREFIX))
                .collect(),
        )
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Value of `key`, treating empty strings as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

/// Directories and files for each tier.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
    /// Explicit config file (overrides project and user tiers)
    pub config_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from variables and defaults.
    pub fn discover(vars: &EnvVars) -> Self {
        let project_dir = vars
            .get(PROJECT_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("app-env")));

        let user_dir = vars
            .get(USER_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".app-env")));

        let config_file = vars.get(CONFIG_PATH_VAR).map(PathBuf::from);

        Self {
            project_dir,
            user_dir,
            config_file,
        }
    }

    /// Create paths with explicit directories and no explicit file.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
            config_file: None,
        }
    }

    /// Use a single explicit file instead of the project and user tiers.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }
}

/// Loads and validates the record for one environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    environment: Environment,
    config: EnvironmentConfig,
    sources: Vec<TierSource>,
}

impl ConfigLoader {
    /// Load the compiled environment's record from all tiers.
    pub fn load() -> ConfigResult<Self> {
        Self::load_for(Environment::compiled())
    }

    /// Load `environment`'s record using the process variables.
    pub fn load_for(environment: Environment) -> ConfigResult<Self> {
        let vars = EnvVars::from_process();
        let paths = ConfigPaths::discover(&vars);
        Self::load_with(environment, paths, &vars)
    }

    /// Load with explicit paths and variables.
    pub fn load_with(
        environment: Environment,
        paths: ConfigPaths,
        vars: &EnvVars,
    ) -> ConfigResult<Self> {
        let (config, sources) = Self::resolve(environment, &paths, vars)?;
        config.validate(environment).check()?;

        info!(
            environment = %environment,
            api_server_url = %config.api_server_url,
            tiers = sources.len(),
            "Configuration loaded"
        );

        Ok(Self {
            environment,
            config,
            sources,
        })
    }

    /// Merge every tier into a record without validating its values.
    ///
    /// Fails only when a source cannot be read or parsed, or a field is
    /// absent after merging. Returns the tiers that contributed.
    pub fn resolve(
        environment: Environment,
        paths: &ConfigPaths,
        vars: &EnvVars,
    ) -> ConfigResult<(EnvironmentConfig, Vec<TierSource>)> {
        let mut tiers: Vec<Value> = Vec::new();
        let mut sources = Vec::new();

        // Tier 0: embedded profile
        let embedded = EnvironmentConfig::embedded_source(environment);
        tiers.push(
            serde_yaml::from_str(embedded)
                .map_err(|e| ConfigError::parse(format!("embedded {} profile", environment), e))?,
        );
        sources.push(TierSource {
            tier: ConfigTier::Embedded,
            path: None,
        });

        if let Some(ref file) = paths.config_file {
            // Explicit file must exist
            debug!(path = %file.display(), "Reading explicit config file");
            tiers.push(read_tier_file(file)?);
            sources.push(TierSource {
                tier: ConfigTier::Explicit,
                path: Some(file.clone()),
            });
        } else {
            for (tier, dir) in [
                (ConfigTier::Project, &paths.project_dir),
                (ConfigTier::User, &paths.user_dir),
            ] {
                let Some(dir) = dir else { continue };
                let file = dir.join(environment.file_name());
                if !file.is_file() {
                    debug!(tier = %tier, path = %file.display(), "No config file for tier");
                    continue;
                }
                debug!(tier = %tier, path = %file.display(), "Reading config file");
                tiers.push(read_tier_file(&file)?);
                sources.push(TierSource {
                    tier,
                    path: Some(file),
                });
            }
        }

        // Tier 4: variable overrides
        let overrides: Vec<(&str, String)> = FIELD_OVERRIDES
            .iter()
            .filter_map(|(var, path)| vars.get(var).map(|v| (*path, v.to_string())))
            .collect();
        if !overrides.is_empty() {
            debug!(count = overrides.len(), "Applying environment variable overrides");
            tiers.push(overlay_from_pairs(overrides));
            sources.push(TierSource {
                tier: ConfigTier::Environment,
                path: None,
            });
        }

        let merged = deep_merge_all(tiers);
        let config =
            EnvironmentConfig::from_value(merged, &format!("{} configuration", environment))?;
        Ok((config, sources))
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> EnvironmentConfig {
        self.config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Tiers that contributed, lowest priority first.
    pub fn sources(&self) -> &[TierSource] {
        &self.sources
    }
}

/// Read one tier file. `.json` files are parsed as JSON, anything else as YAML.
fn read_tier_file(path: &Path) -> ConfigResult<Value> {
    let display = path.display();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(&display, e))?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value: Value = if is_json {
        serde_json::from_str(&content).map_err(|e| ConfigError::parse(&display, e))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(&display, e))?
    };

    match value {
        Value::Object(_) | Value::Null => Ok(value),
        _ => Err(ConfigError::parse(&display, "expected a mapping at the top level")),
    }
}
