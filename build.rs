//! Build-time checks for the embedded environment profiles.
//!
//! Every profile under `config/environments/` must pass the same field,
//! URL and hostname rules the loader applies, so a broken profile fails
//! packaging instead of startup. The selected environment is exported to
//! the crate as `APP_ENVIRONMENT`.

#[path = "build/profile_checks.rs"]
mod profile_checks;

use profile_checks::{ENVIRONMENTS, check_profile};
use serde_yaml::Value;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-env-changed=APP_ENVIRONMENT");
    println!("cargo:rerun-if-changed=build/profile_checks.rs");

    for name in ENVIRONMENTS {
        let path = Path::new("config/environments").join(format!("{name}.yaml"));
        println!("cargo:rerun-if-changed={}", path.display());

        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read profile {}: {e}", path.display()));
        let profile: Value = serde_yaml::from_str(&content)
            .unwrap_or_else(|e| panic!("profile {} is not valid YAML: {e}", path.display()));

        if let Err(problem) = check_profile(name, &profile) {
            panic!("profile {}: {problem}", path.display());
        }
    }

    let selected = match std::env::var("APP_ENVIRONMENT") {
        Ok(value) => {
            let value = value.trim().to_lowercase();
            let value = match value.as_str() {
                "dev" => "development".to_string(),
                "prod" => "production".to_string(),
                _ => value,
            };
            if !ENVIRONMENTS.contains(&value.as_str()) {
                panic!(
                    "APP_ENVIRONMENT='{value}' is not a known environment. Valid options: {}",
                    ENVIRONMENTS.join(", ")
                );
            }
            value
        }
        Err(_) => match std::env::var("PROFILE").as_deref() {
            Ok("release") => "production".to_string(),
            _ => "development".to_string(),
        },
    };
    println!("cargo:rustc-env=APP_ENVIRONMENT={selected}");
}
