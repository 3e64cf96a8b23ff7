//! Locating and loading the settings file for CLI commands.

use anyhow::{Context, Result};
use colored::Colorize;
use keyviz_config::{codec, merge, Diagnostic, Settings};
use std::path::{Path, PathBuf};
use tracing::info;

/// `<config dir>/keyviz/settings.conf`
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("keyviz");
    Ok(config_dir.join("settings.conf"))
}

/// Settings resolved for one command invocation.
pub struct LoadedSettings {
    pub settings: Settings,
    /// File the settings were read from, or would be read from if it existed.
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load `path` (or the default file), falling back to defaults when absent,
/// then apply `name=value` overrides on top.
pub fn load(path: Option<PathBuf>, overrides: &[String]) -> Result<LoadedSettings> {
    let path = match path {
        Some(path) => path,
        None => default_settings_path()?,
    };

    let (mut settings, mut diagnostics) = if path.exists() {
        let report = codec::load_file(&path)
            .with_context(|| format!("Failed to load settings file: {}", path.display()))?;
        (report.settings, report.diagnostics)
    } else {
        info!("No settings file at {}, using defaults", path.display());
        (Settings::new(), Vec::new())
    };

    let assignments = overrides
        .iter()
        .map(|arg| merge::parse_assignment(arg))
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --set argument")?;
    diagnostics.extend(merge::apply(&mut settings, &assignments));

    Ok(LoadedSettings {
        settings,
        path,
        diagnostics,
    })
}

/// Print collected diagnostics to stderr.
pub fn report(source: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!(
            "{} {}: {}",
            "Warning:".yellow().bold(),
            source.display(),
            diagnostic
        );
    }
}
