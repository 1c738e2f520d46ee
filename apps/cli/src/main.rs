mod args;
mod commands;

use crate::args::Cli;
use anyhow::Context;
use clap::Parser;
use forge_kernel::config::load_config;
use forge_kernel::domain::config::ForgeConfig;
use forge_logger::{LevelFilter, Logger};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let mut logger = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level);
    if let Some(dir) = &cli.log_dir {
        logger = logger.path(dir);
    }
    let _logger = logger.init()?;

    let cfg: ForgeConfig = load_config(Some(&cli.config))
        .with_context(|| format!("Critical: cannot load {}", cli.config.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.command, &cfg, &mut out)?;
    out.flush()?;

    Ok(())
}
