use crate::args::Command;
use anyhow::{Context, Result, bail};
use forge_kernel::config::validation::{check_paths, require_profile_set, validate};
use forge_kernel::domain::config::{ForgeConfig, ProfileSet};
use std::io::Write;
use tracing::{debug, info};

const PROFILE_LABELS: [&str; 3] = ["printer", "filament", "print"];

/// Executes one subcommand against an already loaded configuration.
pub(crate) fn run(command: &Command, cfg: &ForgeConfig, out: &mut impl Write) -> Result<()> {
    debug!(?command, "Running command");
    match command {
        Command::Show { json: true } => show_json(cfg, out),
        Command::Show { json: false } => show_text(cfg, out),
        Command::Profile { name } => profile(cfg, name, out),
        Command::Profiles => profiles(cfg, out),
        Command::Check => check(cfg, out),
    }
}

fn show_json(cfg: &ForgeConfig, out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, cfg).context("Failed to serialize configuration")?;
    writeln!(out)?;
    Ok(())
}

fn show_text(cfg: &ForgeConfig, out: &mut impl Write) -> Result<()> {
    let plate = &cfg.helper_tool.plate;
    writeln!(out, "slicer:        {}", cfg.slicer_location().display())?;
    writeln!(out, "print server:  {}", cfg.print_server_address())?;
    writeln!(
        out,
        "helper tool:   {} (plate {}x{} mm, spacing {} mm)",
        cfg.helper_location().display(),
        plate.width,
        plate.height,
        plate.spacing
    )?;
    writeln!(
        out,
        "workspace:     {} -> {}",
        cfg.workspace.input_dir.display(),
        cfg.workspace.output_dir.display()
    )?;
    writeln!(out, "profile sets:")?;
    for (name, set) in cfg.profile_sets() {
        writeln!(out, "  {name}")?;
        write_profile_lines(set, "    ", out)?;
    }
    Ok(())
}

fn profile(cfg: &ForgeConfig, name: &str, out: &mut impl Write) -> Result<()> {
    let set = require_profile_set(cfg, name)?;
    for path in set {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

fn profiles(cfg: &ForgeConfig, out: &mut impl Write) -> Result<()> {
    for name in cfg.profile_set_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn check(cfg: &ForgeConfig, out: &mut impl Write) -> Result<()> {
    let mut problems = 0_usize;

    if let Err(e) = validate(cfg) {
        writeln!(out, "invalid: {e}")?;
        problems += 1;
    }

    for issue in check_paths(cfg) {
        writeln!(out, "unresolved: {issue}")?;
        problems += 1;
    }

    if problems > 0 {
        bail!("{problems} problem(s) found in configuration");
    }

    info!(profile_sets = cfg.profile_sets().len(), "Configuration check passed");
    writeln!(out, "ok: {} profile set(s), all paths resolved", cfg.profile_sets().len())?;
    Ok(())
}

fn write_profile_lines(set: &ProfileSet, indent: &str, out: &mut impl Write) -> Result<()> {
    for (index, path) in set.iter().enumerate() {
        let label = PROFILE_LABELS.get(index).copied().unwrap_or("extra");
        writeln!(out, "{indent}{label:<9} {}", path.display())?;
    }
    Ok(())
}
