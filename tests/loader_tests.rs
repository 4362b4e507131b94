//! Integration tests for tiered configuration loading.
//!
//! Each test points the loader at temp directories and an explicit
//! variable snapshot, so nothing depends on the host's environment.

use app_env::config::{ConfigLoader, ConfigPaths, ConfigTier, EnvVars, FIELD_PATHS};
use app_env::{Environment, EnvironmentConfig, ErrorCode};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Project and user tier directories inside one temp dir.
struct Tiers {
    _temp: TempDir,
    project: PathBuf,
    user: PathBuf,
}

impl Tiers {
    fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let project = temp.path().join("app-env");
        let user = temp.path().join("user");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(&user).unwrap();
        Self {
            _temp: temp,
            project,
            user,
        }
    }

    fn paths(&self) -> ConfigPaths {
        ConfigPaths::with_dirs(Some(self.project.clone()), Some(self.user.clone()))
    }

    fn load(&self, env: Environment) -> ConfigLoader {
        ConfigLoader::load_with(env, self.paths(), &EnvVars::default())
            .expect("Failed to load configuration")
    }
}

#[test]
fn test_development_literal_record() {
    let tiers = Tiers::new();
    let config = tiers.load(Environment::Development).into_config();
    assert_eq!(config.api_server_url, "http://127.0.0.1:5000");
    assert!(!config.production);
}

#[test]
fn test_every_field_is_non_empty() {
    let tiers = Tiers::new();
    for env in Environment::ALL {
        let config = tiers.load(env).into_config();
        for path in FIELD_PATHS {
            let value = config.field(path).unwrap();
            assert!(!value.trim().is_empty(), "{} {} is empty", env, path);
        }
    }
}

#[test]
fn test_urls_and_domain_parse() {
    let tiers = Tiers::new();
    for env in Environment::ALL {
        let config = tiers.load(env).into_config();
        let api = url::Url::parse(&config.api_server_url).unwrap();
        assert!(api.has_host());
        let callback = url::Url::parse(&config.auth.callback_url).unwrap();
        assert!(callback.has_host());
        assert!(matches!(
            url::Host::parse(&config.auth.domain),
            Ok(url::Host::Domain(_))
        ));
    }
}

#[test]
fn test_loading_twice_is_idempotent() {
    let tiers = Tiers::new();
    let first = tiers.load(Environment::Development).into_config();
    let second = tiers.load(Environment::Development).into_config();
    assert_eq!(first, second);
}

#[test]
fn test_switching_environment_keeps_shape() {
    let tiers = Tiers::new();
    let dev = tiers.load(Environment::Development).into_config();
    let prod = tiers.load(Environment::Production).into_config();
    assert_ne!(dev, prod);
    assert!(prod.production);

    let keys = |config: &EnvironmentConfig| {
        let value = serde_json::to_value(config).unwrap();
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.extend(value["auth"].as_object().unwrap().keys().map(|k| format!("auth.{}", k)));
        keys.sort();
        keys
    };
    assert_eq!(keys(&dev), keys(&prod));
}

#[test]
fn test_project_file_overrides_embedded() {
    let tiers = Tiers::new();
    fs::write(
        tiers.project.join("development.yaml"),
        "apiServerUrl: http://127.0.0.1:8000\n",
    )
    .unwrap();

    let loader = tiers.load(Environment::Development);
    assert_eq!(loader.config().api_server_url, "http://127.0.0.1:8000");
    // Untouched fields come from the embedded profile
    assert_eq!(loader.config().auth.callback_url, "http://localhost:8100");
    let tiers_used: Vec<_> = loader.sources().iter().map(|s| s.tier).collect();
    assert_eq!(tiers_used, vec![ConfigTier::Embedded, ConfigTier::Project]);
}

#[test]
fn test_user_file_overrides_project() {
    let tiers = Tiers::new();
    fs::write(
        tiers.project.join("development.yaml"),
        r#"
apiServerUrl: http://127.0.0.1:8000
auth:
  callbackURL: http://localhost:4200
"#,
    )
    .unwrap();
    fs::write(
        tiers.user.join("development.yaml"),
        r#"
auth:
  callbackURL: http://localhost:9000
"#,
    )
    .unwrap();

    let config = tiers.load(Environment::Development).into_config();
    assert_eq!(config.api_server_url, "http://127.0.0.1:8000");
    assert_eq!(config.auth.callback_url, "http://localhost:9000");
    assert_eq!(config.auth.domain, "ferreiratech.eu.auth0.com");
}

#[test]
fn test_files_for_other_environment_are_ignored() {
    let tiers = Tiers::new();
    fs::write(
        tiers.project.join("production.yaml"),
        "apiServerUrl: https://api.example.com\n",
    )
    .unwrap();

    let config = tiers.load(Environment::Development).into_config();
    assert_eq!(config.api_server_url, "http://127.0.0.1:5000");
}

#[test]
fn test_variables_override_files() {
    let tiers = Tiers::new();
    fs::write(
        tiers.user.join("development.yaml"),
        "apiServerUrl: http://127.0.0.1:8000\n",
    )
    .unwrap();
    let vars = EnvVars::from_pairs([
        ("APP_ENV_API_SERVER_URL", "http://api.internal:5000"),
        ("APP_ENV_AUTH_AUDIENCE", "coffee-api"),
    ]);

    let loader = ConfigLoader::load_with(Environment::Development, tiers.paths(), &vars).unwrap();
    assert_eq!(loader.config().api_server_url, "http://api.internal:5000");
    assert_eq!(loader.config().auth.audience, "coffee-api");
    assert_eq!(loader.sources().len(), 3);
}

#[test]
fn test_explicit_json_file_replaces_directory_tiers() {
    let tiers = Tiers::new();
    fs::write(
        tiers.project.join("development.yaml"),
        "apiServerUrl: http://127.0.0.1:8000\n",
    )
    .unwrap();
    let explicit = tiers.user.join("ci.json");
    fs::write(
        &explicit,
        r#"{"auth": {"callbackURL": "http://ci.local:8100"}}"#,
    )
    .unwrap();

    let paths = tiers.paths().with_config_file(&explicit);
    let loader = ConfigLoader::load_with(Environment::Development, paths, &EnvVars::default())
        .unwrap();
    // Project file is skipped when an explicit file is given
    assert_eq!(loader.config().api_server_url, "http://127.0.0.1:5000");
    assert_eq!(loader.config().auth.callback_url, "http://ci.local:8100");
    assert_eq!(loader.sources()[1].tier, ConfigTier::Explicit);
    assert_eq!(loader.sources()[1].path.as_deref(), Some(explicit.as_path()));
}

#[test]
fn test_auth0_layout_only_in_a_complete_record() {
    let tiers = Tiers::new();
    fs::write(
        tiers.project.join("development.yaml"),
        r#"
auth0:
  url: other-tenant.us.auth0.com
"#,
    )
    .unwrap();

    let err = ConfigLoader::load_with(Environment::Development, tiers.paths(), &EnvVars::default())
        .unwrap_err();
    // `auth` from the embedded profile and `auth0` from the file collide
    assert_eq!(err.code, ErrorCode::ParseError);

    let explicit = tiers.user.join("legacy.yaml");
    fs::write(
        &explicit,
        r#"
production: false
apiServerUrl: http://127.0.0.1:5000
auth0:
  url: other-tenant.us.auth0.com
  audience: ferreiratech
  clientId: 4dNGxe7ibww71BoxWxeh1qjTD7Eb2FNV
  callbackURL: http://localhost:8100
"#,
    )
    .unwrap();
    let config = EnvironmentConfig::from_yaml(&fs::read_to_string(&explicit).unwrap(), "legacy")
        .unwrap();
    assert_eq!(config.auth.domain, "other-tenant.us.auth0.com");
}

#[test]
fn test_production_flag_cannot_be_flipped() {
    let tiers = Tiers::new();
    fs::write(tiers.project.join("production.yaml"), "production: false\n").unwrap();

    let err = ConfigLoader::load_with(Environment::Production, tiers.paths(), &EnvVars::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigurationInvalid);
    assert_eq!(err.field.as_deref(), Some("production"));
}

#[test]
fn test_empty_field_is_configuration_missing() {
    let tiers = Tiers::new();
    fs::write(
        tiers.project.join("development.yaml"),
        "auth:\n  clientId: \"\"\n",
    )
    .unwrap();

    let err = ConfigLoader::load_with(Environment::Development, tiers.paths(), &EnvVars::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigurationMissing);
    assert_eq!(err.field.as_deref(), Some("auth.clientId"));
}

#[test]
fn test_malformed_project_file_blocks_loading() {
    let tiers = Tiers::new();
    fs::write(tiers.project.join("development.yaml"), "apiServerUrl: [unclosed\n").unwrap();

    let err = ConfigLoader::load_with(Environment::Development, tiers.paths(), &EnvVars::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ParseError);
}

#[test]
fn test_numeric_audience_is_configuration_invalid() {
    let tiers = Tiers::new();
    fs::write(tiers.project.join("development.yaml"), "auth:\n  audience: 12345\n").unwrap();

    let err = ConfigLoader::load_with(Environment::Development, tiers.paths(), &EnvVars::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigurationInvalid);
    assert_eq!(err.field.as_deref(), Some("auth.audience"));
}

#[test]
fn test_quoted_production_flag_is_configuration_invalid() {
    let tiers = Tiers::new();
    fs::write(tiers.project.join("development.yaml"), "production: \"false\"\n").unwrap();

    let err = ConfigLoader::load_with(Environment::Development, tiers.paths(), &EnvVars::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigurationInvalid);
    assert_eq!(err.field.as_deref(), Some("production"));
}
