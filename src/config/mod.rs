//! Environment configuration records and their loading.
//!
//! Resolves the record for one environment from four tiers, merged field by field:
//! 1. **Embedded** - Profile compiled in from `./config/environments/<env>.yaml`
//! 2. **Project** - `./app-env/<env>.yaml`
//! 3. **User** - `~/.app-env/<env>.yaml`
//! 4. **Environment** - `APP_ENV_*` field overrides
//!
//! ## Environment Variables
//! - `APP_ENV_CONFIG_PATH` - Explicit config file (replaces project and user tiers)
//! - `APP_ENV_PROJECT_DIR` - Project config dir (default: `./app-env`)
//! - `APP_ENV_USER_DIR` - User config dir (default: `~/.app-env`)
//! - `APP_ENV_API_SERVER_URL` - `apiServerUrl`
//! - `APP_ENV_AUTH_DOMAIN` - `auth.domain`
//! - `APP_ENV_AUTH_AUDIENCE` - `auth.audience`
//! - `APP_ENV_AUTH_CLIENT_ID` - `auth.clientId`
//! - `APP_ENV_AUTH_CALLBACK_URL` - `auth.callbackURL`

mod loader;
mod merge;
mod types;
mod validate;

pub use loader::{
    CONFIG_PATH_VAR, ConfigLoader, ConfigPaths, ConfigTier, EnvVars, FIELD_OVERRIDES,
    PROJECT_DIR_VAR, TierSource, USER_DIR_VAR,
};
pub use merge::{deep_merge, deep_merge_all, overlay_from_pairs};
pub use types::{AuthConfig, EnvironmentConfig, FIELD_PATHS, embedded};
pub use validate::{ValidationReport, check_absolute_url, check_hostname};
