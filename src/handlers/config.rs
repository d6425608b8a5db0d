//! Handler for the `config init` command.

use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;
use sweep::config::SweepConfig;

/// Writes the default config file.
///
/// # Errors
/// Returns error if the file exists (without `--force`) or cannot be written.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists. Pass --force to overwrite.", path.display());
    }
    SweepConfig::default().save(path)?;
    println!("{} Wrote {}", "✓".green(), path.display());
    Ok(())
}
