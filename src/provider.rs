//! Process-wide access to the active configuration record.
//!
//! The record is loaded and validated once, then shared read-only for the
//! lifetime of the process. Readers on any thread get the same reference.

use crate::config::{ConfigLoader, EnvironmentConfig};
use crate::environment::Environment;
use crate::error::{ConfigError, ConfigResult};
use std::sync::OnceLock;
use tracing::debug;

static ACTIVE: OnceLock<EnvironmentConfig> = OnceLock::new();

/// The active record, loading it from all tiers on first use.
///
/// Later calls return the record installed by the first successful call
/// (or by [`init`]). A failed load installs nothing.
pub fn active() -> ConfigResult<&'static EnvironmentConfig> {
    if let Some(config) = ACTIVE.get() {
        return Ok(config);
    }
    let loader = ConfigLoader::load()?;
    let environment = loader.environment();
    Ok(install(environment, loader.into_config()))
}

/// Install `loader`'s record as the active one.
///
/// Intended for startup code that wants to choose paths or variables
/// itself. Fails if a record is already active.
pub fn init(loader: ConfigLoader) -> ConfigResult<&'static EnvironmentConfig> {
    if ACTIVE.get().is_some() {
        return Err(already_initialized());
    }
    let environment = loader.environment();
    let config = loader.into_config();
    let installed = install(environment, config.clone());
    // Another thread may have won the race with a different record.
    if *installed != config {
        return Err(already_initialized());
    }
    Ok(installed)
}

/// The active record if one has been installed, without loading.
pub fn current() -> Option<&'static EnvironmentConfig> {
    ACTIVE.get()
}

fn install(environment: Environment, config: EnvironmentConfig) -> &'static EnvironmentConfig {
    ACTIVE.get_or_init(|| {
        debug!(environment = %environment, "Installing active configuration");
        config
    })
}

fn already_initialized() -> ConfigError {
    ConfigError::invalid_value(
        "environment",
        "Configuration is already initialized for this process",
    )
}
