//! Settings session: a value store together with its bindings.
//!
//! All mutation goes through [`Settings`], which re-derives the bindings
//! whenever the store layout changes and records which options were written.

use crate::binding::BindingRegistry;
use crate::error::OptionResult;
use crate::store::{ResourceHandle, ValueStore};
use crate::value::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the option that drives the set count.
pub const SET_COUNT_OPTION: &str = "sets.count";

/// Name of the quality preset option.
pub const QUALITY_OPTION: &str = "quality";

#[derive(Debug)]
pub struct Settings {
    store: ValueStore,
    bindings: BindingRegistry,
    changes: BTreeSet<String>,
    revision: u64,
    file_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Settings holding the compiled-in defaults.
    pub fn new() -> Self {
        Self::from_store(ValueStore::default())
    }

    pub fn from_store(store: ValueStore) -> Self {
        let bindings = BindingRegistry::derive(&store);
        Self {
            store,
            bindings,
            changes: BTreeSet::new(),
            revision: 0,
            file_path: None,
        }
    }

    /// Read-only view for renderers and other collaborators.
    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn bindings(&self) -> &BindingRegistry {
        &self.bindings
    }

    pub fn into_store(self) -> ValueStore {
        self.store
    }

    /// Restore defaults, set count included.
    pub fn reset(&mut self) {
        let previous = self.store.clone();
        self.store.reset();
        self.bindings = BindingRegistry::derive(&self.store);
        if self.store != previous {
            self.mark("*");
        }
    }

    /// Resize every per-set array and rebuild the bindings.
    pub fn resize_sets(&mut self, count: usize) -> usize {
        let before = self.store.set_count();
        let applied = self.store.resize_sets(count);
        if applied != before {
            debug!(from = before, to = applied, "resized color sets");
            self.mark(SET_COUNT_OPTION);
        }
        self.bindings = BindingRegistry::derive(&self.store);
        applied
    }

    pub fn get(&self, name: &str) -> OptionResult<Value> {
        self.bindings.get(&self.store, name)
    }

    /// Write a typed value through the bindings.
    pub fn set(&mut self, name: &str, value: Value) -> OptionResult<()> {
        let changed = self.bindings.set(&mut self.store, name, value)?;
        if name == SET_COUNT_OPTION {
            // the bank is already resized, only the bindings lag behind
            self.bindings = BindingRegistry::derive(&self.store);
            if changed {
                debug!(to = self.store.set_count(), "resized color sets");
            }
        } else if name == QUALITY_OPTION {
            self.store.apply_quality();
        }
        if changed {
            self.mark(name);
        }
        Ok(())
    }

    /// Parse `raw` for the type of `name`, then write it.
    pub fn set_from_str(&mut self, name: &str, raw: &str) -> OptionResult<()> {
        let value = self.bindings.parse(name, raw)?;
        self.set(name, value)
    }

    /// Attach a renderer handle to a path-list option.
    pub fn attach_handle(&mut self, name: &str, handle: ResourceHandle) -> OptionResult<()> {
        self.bindings
            .image_source_mut(&mut self.store, name)?
            .attach_handle(handle);
        Ok(())
    }

    pub fn handle(&self, name: &str) -> OptionResult<Option<ResourceHandle>> {
        Ok(self.bindings.image_source(&self.store, name)?.handle())
    }

    /// Names written since the last call, sorted. `*` stands for a full reset.
    pub fn take_changes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.changes).into_iter().collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Counter bumped on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// File these settings were last loaded from or saved to.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub(crate) fn set_file_path(&mut self, path: &Path) {
        self.file_path = Some(path.to_path_buf());
    }

    fn mark(&mut self, name: &str) {
        self.revision += 1;
        self.changes.insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionError;
    use crate::quality::{Quality, QualityLevel};
    use crate::store::SetColorKind;
    use crate::value::Color;

    #[test]
    fn set_count_option_resizes_and_rebinds() {
        let mut settings = Settings::new();
        settings.set(SET_COUNT_OPTION, Value::Int(3)).unwrap();
        assert_eq!(settings.store().set_count(), 3);
        assert_eq!(settings.bindings().set_count(), 3);
        assert!(settings.get("notes.majorColors.2").is_ok());
        assert!(settings.get("notes.majorColors.3").unwrap_err().is_unknown());
        assert_eq!(settings.take_changes(), vec![SET_COUNT_OPTION]);

        settings.set(SET_COUNT_OPTION, Value::Int(3)).unwrap();
        assert!(!settings.has_changes());
    }

    #[test]
    fn non_finite_write_is_rejected_without_change() {
        let mut settings = Settings::new();
        let err = settings.set("scale", Value::Float(f32::NAN)).unwrap_err();
        assert!(matches!(err, OptionError::Malformed { .. }));
        assert_eq!(settings.store(), &ValueStore::default());
        assert_eq!(settings.revision(), 0);
    }

    #[test]
    fn resize_then_set_new_slot() {
        let mut settings = Settings::new();
        settings.resize_sets(16);
        let green = Color::new(0.0, 1.0, 0.0);
        settings
            .set("keyboard.minorColor.15", Value::Color(green))
            .unwrap();
        assert_eq!(
            settings.store().set_color(SetColorKind::KeyboardMinor, 15),
            Some(green)
        );
    }

    #[test]
    fn quality_write_applies_preset() {
        let mut settings = Settings::new();
        settings.set_from_str(QUALITY_OPTION, "HIGH_RES").unwrap();
        let preset = Quality::by_level(QualityLevel::HighRes);
        let globals = &settings.store().globals;
        assert_eq!(globals.quality, 4);
        assert_eq!(globals.particles_resolution, preset.particles_resolution);
        assert_eq!(globals.blur_resolution, preset.blur_resolution);
        assert_eq!(globals.final_resolution, preset.final_resolution);
    }

    #[test]
    fn changes_are_tracked_and_drained() {
        let mut settings = Settings::new();
        settings.set_from_str("showWave", "0").unwrap();
        settings.set_from_str("scale", "2").unwrap();
        // unchanged writes are not reported
        settings.set_from_str("showNotes", "1").unwrap();

        assert_eq!(settings.revision(), 2);
        assert_eq!(settings.take_changes(), vec!["scale", "showWave"]);
        assert!(!settings.has_changes());
    }

    #[test]
    fn rejected_key_keeps_previous_value() {
        let mut settings = Settings::new();
        settings.set_from_str("maxKey", "100").unwrap();
        let err = settings.set_from_str("maxKey", "128").unwrap_err();
        assert!(matches!(err, OptionError::OutOfRange { .. }));
        assert_eq!(settings.store().globals.max_key, 100);
    }

    #[test]
    fn handles_follow_path_identity() {
        let mut settings = Settings::new();
        settings
            .set_from_str("background.imagePath", "/tmp/bg.png")
            .unwrap();
        settings.attach_handle("background.imagePath", 42).unwrap();
        assert_eq!(settings.handle("background.imagePath").unwrap(), Some(42));

        settings
            .set_from_str("background.imagePath", "/tmp/bg.png")
            .unwrap();
        assert_eq!(settings.handle("background.imagePath").unwrap(), Some(42));

        settings
            .set_from_str("background.imagePath", "/tmp/other.png")
            .unwrap();
        assert_eq!(settings.handle("background.imagePath").unwrap(), None);
        assert!(settings.attach_handle("scale", 1).is_err());
    }

    #[test]
    fn reset_rebuilds_bindings() {
        let mut settings = Settings::new();
        settings.resize_sets(2);
        settings.reset();
        assert_eq!(settings.store(), &ValueStore::default());
        assert_eq!(
            settings.bindings().set_count(),
            settings.store().set_count()
        );
    }
}
