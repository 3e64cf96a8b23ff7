//! Versioned line-oriented text encoding of [`Settings`].
//!
//! ```text
//! # keyviz settings file
//! # Version (do not modify)
//! 7 1
//! background.color 0 0 0
//! notes.majorImagePath /images/one.png
//! notes.majorImagePath /images/two.png
//! ```
//!
//! Only a missing or unreadable version header fails a load. Every other
//! problem is collected as a [`Diagnostic`] and the line is skipped.

use crate::error::{CodecError, Diagnostic, OptionError};
use crate::legacy::{self, FormatVersion, Resolution, CURRENT_VERSION, LEGACY_RULES};
use crate::schema::OptionSchema;
use crate::settings::{Settings, SET_COUNT_OPTION};
use crate::value::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// First line of every saved file.
pub const FILE_BANNER: &str = "# keyviz settings file";

const VERSION_COMMENT: &str = "# Version (do not modify)";

/// Result of a successful load.
#[derive(Debug)]
pub struct LoadReport {
    pub settings: Settings,
    /// Version stamp found in the file.
    pub version: FormatVersion,
    /// Problems with individual lines, in file order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Serialize every binding with the current version stamp.
///
/// Output is deterministic: bindings are written in registry order and
/// floats use their shortest round-trip representation.
pub fn save(settings: &Settings) -> String {
    let bindings = settings.bindings();
    let mut out = String::new();
    out.push_str(FILE_BANNER);
    out.push('\n');
    out.push_str(VERSION_COMMENT);
    out.push('\n');
    out.push_str(&format!("{} {}\n", CURRENT_VERSION.major, CURRENT_VERSION.minor));

    for name in bindings.names() {
        match bindings.render(settings.store(), name) {
            Ok(values) => {
                for value in values {
                    out.push_str(name);
                    out.push(' ');
                    out.push_str(&value);
                    out.push('\n');
                }
            }
            Err(err) => warn!("Skipping option {} while saving: {}", name, err),
        }
    }
    out
}

/// Parse a settings file on top of the defaults.
pub fn load(text: &str) -> Result<LoadReport, CodecError> {
    let mut settings = Settings::new();
    let (version, diagnostics) = load_into(&mut settings, text)?;
    // a fresh load has nothing pending for collaborators
    settings.take_changes();
    Ok(LoadReport {
        settings,
        version,
        diagnostics,
    })
}

/// Overlay a settings file onto existing settings.
pub fn load_into(
    settings: &mut Settings,
    text: &str,
) -> Result<(FormatVersion, Vec<Diagnostic>), CodecError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (_, header) = lines.next().ok_or(CodecError::MissingHeader)?;
    let version = FormatVersion::parse(header).ok_or_else(|| CodecError::InvalidHeader {
        line: header.to_string(),
    })?;
    if version > CURRENT_VERSION {
        warn!(
            "Settings file version {} is newer than {}, loading what is understood",
            version, CURRENT_VERSION
        );
    }

    let entries: Vec<Entry<'_>> = lines.map(|(line, text)| Entry::split(line, text)).collect();

    let mut loader = Loader {
        settings,
        version,
        diagnostics: Vec::new(),
        paths: Vec::new(),
    };
    // per-set lines are only bound once the set count is known
    for entry in entries.iter().filter(|e| e.name == SET_COUNT_OPTION) {
        loader.apply(entry);
    }
    for entry in entries.iter().filter(|e| e.name != SET_COUNT_OPTION) {
        loader.apply(entry);
    }
    loader.flush_paths();

    let diagnostics = loader.diagnostics;
    if !diagnostics.is_empty() {
        warn!("{} problem(s) while reading settings", diagnostics.len());
    }
    Ok((version, diagnostics))
}

/// Read and parse a settings file from disk.
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadReport, CodecError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut report = load(&text)?;
    report.settings.set_file_path(path);
    info!("Loaded settings from {:?} (version {})", path, report.version);
    Ok(report)
}

/// Write settings to disk, creating parent directories as needed.
pub fn save_file(settings: &mut Settings, path: impl AsRef<Path>) -> Result<(), CodecError> {
    let path = path.as_ref();
    let io_error = |source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, save(settings)).map_err(io_error)?;
    settings.set_file_path(path);
    info!("Saved settings to {:?}", path);
    Ok(())
}

/// One body line split into name and raw value.
struct Entry<'a> {
    line: usize,
    name: &'a str,
    raw: &'a str,
}

impl<'a> Entry<'a> {
    fn split(line: usize, text: &'a str) -> Self {
        let (name, raw) = text
            .split_once(char::is_whitespace)
            .unwrap_or((text, ""));
        Self {
            line,
            name: name.trim_end_matches(':'),
            raw: raw.trim(),
        }
    }
}

struct Loader<'s> {
    settings: &'s mut Settings,
    version: FormatVersion,
    diagnostics: Vec<Diagnostic>,
    /// Path lists collected across repeated lines, in first-seen order.
    paths: Vec<(String, Vec<String>)>,
}

impl Loader<'_> {
    fn apply(&mut self, entry: &Entry<'_>) {
        let legacy = self.version < CURRENT_VERSION;
        let resolution = if legacy {
            legacy::translate(LEGACY_RULES, OptionSchema::builtin(), self.version, entry.name)
        } else {
            Resolution::Apply {
                target: entry.name.to_string(),
                broadcast: false,
                transforms: Vec::new(),
            }
        };

        let targets = match &resolution {
            Resolution::Dropped => {
                debug!(line = entry.line, name = entry.name, "dropping removed option");
                return;
            }
            Resolution::Apply {
                target, broadcast, ..
            } if *broadcast => (0..self.settings.store().set_count())
                .map(|i| format!("{target}.{i}"))
                .collect(),
            Resolution::Apply { target, .. } => vec![target.clone()],
        };
        let Some(first) = targets.first() else {
            return;
        };

        let bindings = self.settings.bindings();
        if !bindings.contains(first) {
            if legacy {
                debug!(line = entry.line, name = entry.name, "ignoring unknown legacy option");
            } else {
                self.diagnostics.push(Diagnostic::at_line(
                    entry.line,
                    OptionError::Unknown {
                        name: entry.name.to_string(),
                    },
                ));
            }
            return;
        }

        let value = match bindings.parse(first, entry.raw) {
            Ok(value) => resolution.transform(value, entry.raw),
            Err(err) => {
                self.diagnostics.push(Diagnostic::at_line(entry.line, err));
                return;
            }
        };

        for target in targets {
            match &value {
                Value::Paths(paths) => self.collect_paths(target, paths),
                value => {
                    if let Err(err) = self.settings.set(&target, value.clone()) {
                        self.diagnostics.push(Diagnostic::at_line(entry.line, err));
                    }
                }
            }
        }
    }

    fn collect_paths(&mut self, name: String, paths: &[String]) {
        match self.paths.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, list)) => list.extend_from_slice(paths),
            None => self.paths.push((name, paths.to_vec())),
        }
    }

    fn flush_paths(&mut self) {
        for (name, paths) in std::mem::take(&mut self.paths) {
            if let Err(err) = self.settings.set(&name, Value::Paths(paths)) {
                self.diagnostics.push(Diagnostic::detached(err));
            }
        }
    }
}
