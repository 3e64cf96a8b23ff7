use anyhow::{Context, Result};
use colored::Colorize;
use keyviz_config::codec;
use std::path::PathBuf;

use crate::config;

/// Print the normalized settings file after overrides.
pub fn show(path: Option<PathBuf>, overrides: &[String]) -> Result<()> {
    let loaded = config::load(path, overrides)?;
    config::report(&loaded.path, &loaded.diagnostics);
    print!("{}", codec::save(&loaded.settings));
    Ok(())
}

/// Apply overrides and save the result.
pub fn write(path: Option<PathBuf>, overrides: &[String], output: Option<PathBuf>) -> Result<()> {
    let mut loaded = config::load(path, overrides)?;
    config::report(&loaded.path, &loaded.diagnostics);

    let destination = output.unwrap_or(loaded.path);
    codec::save_file(&mut loaded.settings, &destination)
        .with_context(|| format!("Failed to write settings file: {}", destination.display()))?;

    println!(
        "{} Wrote settings to: {}",
        "Success:".green().bold(),
        destination.display()
    );
    Ok(())
}
