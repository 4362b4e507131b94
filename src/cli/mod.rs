//! CLI command definitions for app-env
//!
//! Used by build and packaging tooling to inspect and check the
//! configuration a build will carry.

pub mod show;
pub mod validate;

use clap::{Parser, Subcommand};
use show::{GetArgs, ShowArgs};
use validate::ValidateArgs;

/// Inspect and validate environment configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file (replaces project and user tiers)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Environment to resolve (default: the one this binary was built for)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration record (default if no subcommand given)
    Show(ShowArgs),

    /// Print a single field by its dotted path
    Get(GetArgs),

    /// Validate the resolved record, or every embedded profile
    Validate(ValidateArgs),

    /// List environments and where their values come from
    List,
}
