//! Command-line interface of the `forge` binary.

use clap::{Parser, Subcommand};
use forge_kernel::config::DEFAULT_CONFIG_NAME;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "forge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect and check the slicing toolchain configuration")]
pub(crate) struct Cli {
    /// Configuration file; the extension may be omitted (`forge` finds `forge.toml`)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_NAME)]
    pub(crate) config: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Also write logs into this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub(crate) log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the loaded configuration
    Show {
        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the paths of one profile set, in order
    Profile {
        /// Name of the profile set
        name: String,
    },
    /// List the defined profile sets
    Profiles,
    /// Validate the configuration and probe every configured path
    Check,
}
