//! Show and get subcommands.

use crate::format::OutputFormat;
use clap::Args;

/// Arguments for the show subcommand
#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Output format: json (default) or yaml
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    pub format: OutputFormat,
}

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted field path, e.g. apiServerUrl or auth.callbackURL
    #[arg(value_name = "FIELD")]
    pub field: String,
}
