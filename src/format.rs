//! Output formatting for records and validation reports.

use crate::config::{EnvironmentConfig, ValidationReport};
use anyhow::Result;

/// Output format for `show`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!("Invalid format '{}'. Valid options: json, yaml", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render a record with its wire field names.
pub fn render_config(config: &EnvironmentConfig, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(rendered)
}

/// Render validation reports as plain text, one line per problem.
pub fn render_reports_text(reports: &[ValidationReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let name = report
            .environment
            .map(|env| env.to_string())
            .unwrap_or_else(|| "configuration".to_string());
        if report.is_valid() {
            out.push_str(&format!("{}: ok\n", name));
            continue;
        }
        out.push_str(&format!("{}: {} problem(s)\n", name, report.errors.len()));
        for err in &report.errors {
            out.push_str(&format!("  - {}", err.message));
            if let Some(ref details) = err.details {
                out.push_str(&format!(" ({})", details));
            }
            out.push('\n');
        }
    }
    out
}
