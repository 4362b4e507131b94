//! Environment-scoped application configuration.
//!
//! Each build selects one deployment environment and exposes its
//! configuration record (backend API URL and identity-provider settings)
//! as immutable, process-wide state.
//!
//! ```no_run
//! let config = app_env::provider::active()?;
//! println!("API at {}", config.api_server_url);
//! # Ok::<(), app_env::error::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod format;
pub mod logging;
pub mod provider;

pub use config::{AuthConfig, EnvironmentConfig};
pub use environment::Environment;
pub use error::{ConfigError, ConfigResult, ErrorCode};
