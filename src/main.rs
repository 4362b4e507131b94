//! app-env
//!
//! Resolves, prints and validates the environment configuration a
//! frontend build carries.

use anyhow::{Result, anyhow};
use app_env::cli::show::{GetArgs, ShowArgs};
use app_env::cli::validate::{ReportFormat, ValidateArgs};
use app_env::cli::{Cli, Command};
use app_env::config::{
    CONFIG_PATH_VAR, ConfigLoader, ConfigPaths, EnvVars, EnvironmentConfig, ValidationReport,
};
use app_env::environment::Environment;
use app_env::format::{render_config, render_reports_text};
use app_env::logging::{self, LogTarget};
use app_env::provider;
use clap::Parser;
use tracing::{debug, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    // --config takes the place of APP_ENV_CONFIG_PATH for this run
    let mut vars = EnvVars::from_process();
    if let Some(config_path) = &cli.config {
        vars.set(CONFIG_PATH_VAR, config_path.as_str());
    }

    let environment = match &cli.env {
        Some(name) => Environment::parse(name)?,
        None => Environment::compiled(),
    };
    debug!(environment = %environment, compiled = %Environment::compiled(), "Selected environment");

    match cli.command {
        Some(Command::Show(args)) => run_show(environment, &vars, args)?,
        None => run_show(environment, &vars, ShowArgs::default())?,
        Some(Command::Get(args)) => run_get(environment, &vars, args)?,
        Some(Command::Validate(args)) => {
            if !run_validate(environment, &vars, args)? {
                std::process::exit(1);
            }
        }
        Some(Command::List) => run_list(&vars),
    }

    Ok(())
}

/// Load, validate and install the record for `environment`.
fn activate(environment: Environment, vars: &EnvVars) -> Result<&'static EnvironmentConfig> {
    let loader = ConfigLoader::load_with(environment, ConfigPaths::discover(vars), vars)?;
    Ok(provider::init(loader)?)
}

fn run_show(environment: Environment, vars: &EnvVars, args: ShowArgs) -> Result<()> {
    let config = activate(environment, vars)?;
    println!("{}", render_config(config, args.format)?);
    Ok(())
}

fn run_get(environment: Environment, vars: &EnvVars, args: GetArgs) -> Result<()> {
    let config = activate(environment, vars)?;
    let value = config
        .field(&args.field)
        .ok_or_else(|| anyhow!("Unknown field '{}'", args.field))?;
    println!("{}", value);
    Ok(())
}

/// Print validation reports. Returns false if any record is invalid.
fn run_validate(environment: Environment, vars: &EnvVars, args: ValidateArgs) -> Result<bool> {
    let reports: Vec<ValidationReport> = if args.all {
        Environment::ALL
            .into_iter()
            .map(|env| match EnvironmentConfig::embedded(env) {
                Ok(config) => config.validate(env),
                Err(e) => failed_report(env, e),
            })
            .collect()
    } else {
        let paths = ConfigPaths::discover(vars);
        let report = match ConfigLoader::resolve(environment, &paths, vars) {
            Ok((config, _)) => config.validate(environment),
            Err(e) => failed_report(environment, e),
        };
        vec![report]
    };

    match args.format {
        ReportFormat::Text => print!("{}", render_reports_text(&reports)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    let valid = reports.iter().all(ValidationReport::is_valid);
    if !valid {
        warn!("Configuration validation failed");
    }
    Ok(valid)
}

fn failed_report(environment: Environment, err: app_env::ConfigError) -> ValidationReport {
    ValidationReport {
        environment: Some(environment),
        errors: vec![err],
    }
}

fn run_list(vars: &EnvVars) {
    let compiled = Environment::compiled();
    let paths = ConfigPaths::discover(vars);
    for env in Environment::ALL {
        let marker = if env == compiled { " (compiled)" } else { "" };
        match ConfigLoader::resolve(env, &paths, vars) {
            Ok((config, sources)) => {
                let tiers: Vec<String> = sources
                    .iter()
                    .map(|s| match &s.path {
                        Some(path) => format!("{}: {}", s.tier, path.display()),
                        None => s.tier.to_string(),
                    })
                    .collect();
                println!("{}{}", env, marker);
                println!("  apiServerUrl: {}", config.api_server_url);
                println!("  sources: {}", tiers.join(", "));
            }
            Err(e) => {
                println!("{}{}", env, marker);
                println!("  error: {}", e);
            }
        }
    }
}
