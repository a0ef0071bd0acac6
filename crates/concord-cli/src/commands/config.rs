//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use concord_engine::Consensus;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, path: &Path, formatter: &Formatter) -> Result<()> {
    match args.action {
        ConfigAction::Init { force } => init(path, force, formatter),
        ConfigAction::Show => show(path, formatter),
    }
}

fn init(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );
    Ok(())
}

fn show(path: &Path, formatter: &Formatter) -> Result<()> {
    let config = Config::load_from(path)?;
    // Surface validation errors here rather than on the next run
    Consensus::new(config.engine.clone())?;

    if !path.exists() {
        eprintln!(
            "{}",
            formatter.info(&format!("{} not found; showing defaults", path.display()))
        );
    }
    println!("{}", config.to_toml()?);
    Ok(())
}
