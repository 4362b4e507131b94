//! Validate subcommand.
//!
//! Exits non-zero when any checked record is invalid, so packaging
//! scripts can gate a deployment on it.

use clap::Args;

/// Arguments for the validate subcommand
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Check every embedded profile instead of the resolved record
    #[arg(long)]
    pub all: bool,

    /// Report format: text (default) or json
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    pub format: ReportFormat,
}

/// Output format for validation reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Invalid format '{}'. Valid options: text, json", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}
