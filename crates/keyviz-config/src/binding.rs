//! Binding registry: name-keyed typed access into a [`ValueStore`].
//!
//! Locations are accessor functions rather than references, so a registry
//! never borrows the store it was derived from. It does remember the set
//! count of that store and refuses to operate on a store whose layout has
//! changed since.

use crate::error::{OptionError, OptionResult};
use crate::schema::{OptionMeta, OptionSchema};
use crate::settings::SET_COUNT_OPTION;
use crate::store::{ImageSource, SetColorKind, ValueStore};
use crate::value::{self, Category, Color, OptionType, Value};
use std::collections::BTreeMap;

/// The five storage partitions of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Bool,
    Int,
    Float,
    Color,
    Path,
}

impl Partition {
    pub fn label(self) -> &'static str {
        match self {
            Partition::Bool => "bool",
            Partition::Int => "int",
            Partition::Float => "float",
            Partition::Color => "color",
            Partition::Path => "path",
        }
    }
}

/// Read and write accessors for one field of the store.
pub(crate) struct Field<T: 'static> {
    read: fn(&ValueStore) -> &T,
    write: fn(&mut ValueStore) -> &mut T,
}

impl<T> Field<T> {
    fn new(read: fn(&ValueStore) -> &T, write: fn(&mut ValueStore) -> &mut T) -> Self {
        Self { read, write }
    }
}

pub(crate) enum ColorSlot {
    Field(Field<Color>),
    Set(SetColorKind, usize),
}

impl ColorSlot {
    fn read(&self, store: &ValueStore) -> Option<Color> {
        match self {
            ColorSlot::Field(field) => Some(*(field.read)(store)),
            ColorSlot::Set(kind, index) => store.set_color(*kind, *index),
        }
    }

    fn write<'a>(&self, store: &'a mut ValueStore) -> Option<&'a mut Color> {
        match self {
            ColorSlot::Field(field) => Some((field.write)(store)),
            ColorSlot::Set(kind, index) => store.bank.get_mut(*index).map(|set| set.get_mut(*kind)),
        }
    }
}

macro_rules! bind {
    ($map:expr, $name:literal => $($part:ident).+) => {
        $map.insert(
            $name.to_string(),
            Field::new(|s| &s.$($part).+, |s| &mut s.$($part).+),
        )
    };
}

/// Name to location tables, partitioned by value type.
pub struct BindingRegistry {
    bools: BTreeMap<String, Field<bool>>,
    ints: BTreeMap<String, Field<i32>>,
    floats: BTreeMap<String, Field<f32>>,
    colors: BTreeMap<String, ColorSlot>,
    paths: BTreeMap<String, Field<ImageSource>>,
    order: Vec<String>,
    set_count: usize,
    schema: &'static OptionSchema,
}

impl std::fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingRegistry")
            .field("bindings", &self.order.len())
            .field("set_count", &self.set_count)
            .finish()
    }
}

impl BindingRegistry {
    /// Walk the layout of `store` and bind every option of the built-in schema.
    pub fn derive(store: &ValueStore) -> Self {
        let mut bools = BTreeMap::new();
        let mut ints = BTreeMap::new();
        let mut floats = BTreeMap::new();
        let mut colors = BTreeMap::new();
        let mut paths = BTreeMap::new();

        bind!(paths, "background.imagePath" => background.image_source);
        bind!(paths, "particles.imagePaths" => particles.images);
        bind!(paths, "notes.majorImagePath" => notes.major_image);
        bind!(paths, "notes.minorImagePath" => notes.minor_image);

        bind!(bools, "background.hLines" => background.h_lines);
        bind!(bools, "background.vLines" => background.v_lines);
        bind!(bools, "background.digits" => background.digits);
        bind!(bools, "background.image" => background.image);
        bind!(bools, "background.imageBehindKeyboard" => background.image_behind_keyboard);
        bind!(bools, "keyboard.highlightKeys" => keyboard.highlight_keys);
        bind!(bools, "keyboard.customKeyColors" => keyboard.custom_key_colors);
        bind!(bools, "keyboard.minorEdges" => keyboard.minor_edges);
        bind!(bools, "pedals.merge" => pedals.merge);
        bind!(bools, "notes.majorTexScroll" => notes.major_tex_scroll);
        bind!(bools, "notes.minorTexScroll" => notes.minor_tex_scroll);
        bind!(bools, "showParticles" => flags.show_particles);
        bind!(bools, "showFlashes" => flags.show_flashes);
        bind!(bools, "showBlur" => flags.show_blur);
        bind!(bools, "showBlurNotes" => flags.show_blur_notes);
        bind!(bools, "lockParticleColor" => flags.lock_particle_color);
        bind!(bools, "showNotes" => flags.show_notes);
        bind!(bools, "showScore" => flags.show_score);
        bind!(bools, "showKeyboard" => flags.show_keyboard);
        bind!(bools, "perSetColors" => flags.per_set_colors);
        bind!(bools, "showPedal" => flags.show_pedal);
        bind!(bools, "showWave" => flags.show_wave);
        bind!(bools, "applyAA" => flags.apply_aa);
        bind!(bools, "reverseScroll" => flags.reverse_scroll);
        bind!(bools, "horizontalScroll" => flags.horizontal_scroll);

        bind!(ints, "particles.count" => particles.count);
        bind!(ints, "pedals.location" => pedals.location);
        bind!(ints, "sets.count" => sets.count);
        bind!(ints, "sets.mode" => sets.mode);
        bind!(ints, "sets.separatorKey" => sets.separator_key);
        bind!(ints, "quality" => globals.quality);
        bind!(ints, "minKey" => globals.min_key);
        bind!(ints, "maxKey" => globals.max_key);

        bind!(floats, "background.minorsWidth" => background.minors_width);
        bind!(floats, "background.imageAlpha" => background.image_alpha);
        bind!(floats, "particles.speed" => particles.speed);
        bind!(floats, "particles.expansion" => particles.expansion);
        bind!(floats, "particles.scale" => particles.scale);
        bind!(floats, "keyboard.size" => keyboard.size);
        bind!(floats, "keyboard.minorHeight" => keyboard.minor_height);
        bind!(floats, "pedals.size" => pedals.size);
        bind!(floats, "pedals.opacity" => pedals.opacity);
        bind!(floats, "wave.opacity" => wave.opacity);
        bind!(floats, "wave.spread" => wave.spread);
        bind!(floats, "wave.amplitude" => wave.amplitude);
        bind!(floats, "wave.frequency" => wave.frequency);
        bind!(floats, "notes.fadeOut" => notes.fade_out);
        bind!(floats, "notes.edgeWidth" => notes.edge_width);
        bind!(floats, "notes.edgeBrightness" => notes.edge_brightness);
        bind!(floats, "notes.cornerRadius" => notes.corner_radius);
        bind!(floats, "notes.majorTexScale" => notes.major_tex_scale);
        bind!(floats, "notes.minorTexScale" => notes.minor_tex_scale);
        bind!(floats, "notes.majorTexAlpha" => notes.major_tex_alpha);
        bind!(floats, "notes.minorTexAlpha" => notes.minor_tex_alpha);
        bind!(floats, "flashes.size" => flashes.size);
        bind!(floats, "scale" => globals.scale);
        bind!(floats, "attenuation" => globals.attenuation);
        bind!(floats, "prerollTime" => globals.preroll_time);
        bind!(floats, "scrollSpeed" => globals.scroll_speed);

        let mut color_fields = BTreeMap::new();
        bind!(color_fields, "background.color" => background.color);
        bind!(color_fields, "background.linesColor" => background.lines_color);
        bind!(color_fields, "background.textColor" => background.text_color);
        bind!(color_fields, "background.keysColor" => background.keys_color);
        bind!(color_fields, "pedals.color" => pedals.color);
        bind!(color_fields, "wave.color" => wave.color);
        for (name, field) in color_fields {
            colors.insert(name, ColorSlot::Field(field));
        }

        let set_count = store.set_count();
        for kind in SetColorKind::ALL {
            for index in 0..set_count {
                colors.insert(
                    format!("{}.{}", kind.option_name(), index),
                    ColorSlot::Set(kind, index),
                );
            }
        }

        let mut registry = Self {
            bools,
            ints,
            floats,
            colors,
            paths,
            order: Vec::new(),
            set_count,
            schema: OptionSchema::builtin(),
        };
        registry.order = registry.sorted_names();
        registry
    }

    /// Set count of the store this registry was derived from.
    pub fn set_count(&self) -> usize {
        self.set_count
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every bound name, by category, then option name, then set index.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Which partition holds `name`, if any.
    pub fn partition(&self, name: &str) -> Option<Partition> {
        if self.bools.contains_key(name) {
            Some(Partition::Bool)
        } else if self.ints.contains_key(name) {
            Some(Partition::Int)
        } else if self.floats.contains_key(name) {
            Some(Partition::Float)
        } else if self.colors.contains_key(name) {
            Some(Partition::Color)
        } else if self.paths.contains_key(name) {
            Some(Partition::Path)
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.partition(name).is_some()
    }

    /// Metadata of a bound option.
    pub fn meta(&self, name: &str) -> OptionResult<&'static OptionMeta> {
        if !self.contains(name) {
            return Err(unknown(name));
        }
        self.schema.lookup(name).ok_or_else(|| unknown(name))
    }

    /// Read the current value of `name`.
    pub fn get(&self, store: &ValueStore, name: &str) -> OptionResult<Value> {
        self.check_layout(store)?;
        if let Some(field) = self.bools.get(name) {
            return Ok(Value::Bool(*(field.read)(store)));
        }
        if let Some(field) = self.ints.get(name) {
            return Ok(Value::Int(*(field.read)(store)));
        }
        if let Some(field) = self.floats.get(name) {
            return Ok(Value::Float(*(field.read)(store)));
        }
        if let Some(slot) = self.colors.get(name) {
            return slot.read(store).map(Value::Color).ok_or_else(|| unknown(name));
        }
        if let Some(field) = self.paths.get(name) {
            return Ok(Value::Paths((field.read)(store).paths().to_vec()));
        }
        Err(unknown(name))
    }

    /// Write `value` to `name`, returning whether the stored value changed.
    ///
    /// Ints and floats are clamped into the option range. Keys and choices
    /// outside their range are rejected and the previous value is kept, as
    /// are non-finite numbers and paths the file format cannot hold.
    ///
    /// Writing the set count resizes the color bank, which leaves this
    /// registry stale; derive a new one before further use.
    pub fn set(&self, store: &mut ValueStore, name: &str, value: Value) -> OptionResult<bool> {
        self.check_layout(store)?;
        let partition = self.partition(name).ok_or_else(|| unknown(name))?;
        let meta = self.meta(name)?;

        match (partition, value) {
            (Partition::Bool, Value::Bool(v)) => {
                let slot = (self.bools[name].write)(store);
                Ok(replace(slot, v))
            }
            (Partition::Int, Value::Int(v)) => {
                let v = checked_int(meta, name, v)?;
                let slot = (self.ints[name].write)(store);
                let changed = replace(slot, v);
                if name == SET_COUNT_OPTION {
                    // int range keeps v >= 1
                    store.resize_sets(v as usize);
                }
                Ok(changed)
            }
            (Partition::Float, Value::Float(v)) => {
                if !v.is_finite() {
                    return Err(non_finite(name, v.to_string()));
                }
                let v = v.clamp(meta.range[0], meta.range[1]);
                let slot = (self.floats[name].write)(store);
                Ok(replace(slot, v))
            }
            (Partition::Float, Value::Int(v)) => {
                let v = (v as f32).clamp(meta.range[0], meta.range[1]);
                let slot = (self.floats[name].write)(store);
                Ok(replace(slot, v))
            }
            (Partition::Color, Value::Color(v)) => {
                if ![v.r, v.g, v.b].iter().all(|c| c.is_finite()) {
                    return Err(non_finite(name, v.to_string()));
                }
                let slot = self.colors[name].write(store).ok_or_else(|| unknown(name))?;
                Ok(replace(slot, v.clamped()))
            }
            (Partition::Path, Value::Paths(paths)) => {
                if let Some(bad) = paths.iter().find(|path| !storable_path(path)) {
                    return Err(OptionError::Malformed {
                        name: name.to_string(),
                        value: bad.clone(),
                        expected: "a non-empty path on one line without surrounding whitespace",
                    });
                }
                let source = (self.paths[name].write)(store);
                Ok(source.replace(paths))
            }
            (partition, _) => Err(OptionError::TypeMismatch {
                name: name.to_string(),
                expected: partition.label(),
            }),
        }
    }

    /// Parse raw option text into a value of the type `name` expects.
    pub fn parse(&self, name: &str, raw: &str) -> OptionResult<Value> {
        let meta = self.meta(name)?;
        let raw = raw.trim();
        let malformed = |expected: &'static str| OptionError::Malformed {
            name: name.to_string(),
            value: raw.to_string(),
            expected,
        };
        match meta.kind {
            OptionType::Bool => value::parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| malformed("0 or 1")),
            OptionType::Int | OptionType::Key => value::parse_int(raw)
                .map(|v| Value::Int(saturate(v)))
                .ok_or_else(|| malformed("an integer")),
            OptionType::Float => value::parse_float(raw)
                .map(Value::Float)
                .ok_or_else(|| malformed("a number")),
            OptionType::Color => value::parse_color(raw)
                .map(Value::Color)
                .ok_or_else(|| malformed("three numbers")),
            OptionType::Path => Ok(Value::Paths(if raw.is_empty() {
                Vec::new()
            } else {
                vec![raw.to_string()]
            })),
            OptionType::Other => meta
                .values
                .iter()
                .position(|choice| choice.eq_ignore_ascii_case(raw))
                .map(|i| Value::Int(i as i32))
                .or_else(|| value::parse_int(raw).map(|v| Value::Int(saturate(v))))
                .ok_or_else(|| malformed("one of the listed choices")),
        }
    }

    /// Encode the current value of `name` as file text, one string per line.
    ///
    /// Path lists give one entry per path and nothing when empty.
    pub fn render(&self, store: &ValueStore, name: &str) -> OptionResult<Vec<String>> {
        let meta = self.meta(name)?;
        let rendered = match self.get(store, name)? {
            Value::Bool(v) => vec![value::format_bool(v).to_string()],
            Value::Int(v) if meta.kind == OptionType::Other => {
                let choice = usize::try_from(v).ok().and_then(|i| meta.values.get(i));
                vec![choice.map_or_else(|| v.to_string(), |c| c.to_string())]
            }
            Value::Int(v) => vec![v.to_string()],
            Value::Float(v) => vec![v.to_string()],
            Value::Color(c) => vec![c.to_string()],
            Value::Paths(paths) => paths,
        };
        Ok(rendered)
    }

    /// Path-list accessor used for attaching renderer handles.
    pub fn image_source_mut<'a>(
        &self,
        store: &'a mut ValueStore,
        name: &str,
    ) -> OptionResult<&'a mut ImageSource> {
        self.check_layout(store)?;
        let field = self.paths.get(name).ok_or_else(|| unknown(name))?;
        Ok((field.write)(store))
    }

    pub fn image_source<'a>(&self, store: &'a ValueStore, name: &str) -> OptionResult<&'a ImageSource> {
        self.check_layout(store)?;
        let field = self.paths.get(name).ok_or_else(|| unknown(name))?;
        Ok((field.read)(store))
    }

    fn check_layout(&self, store: &ValueStore) -> OptionResult<()> {
        if store.set_count() != self.set_count {
            return Err(OptionError::StaleBindings {
                derived: self.set_count,
                actual: store.set_count(),
            });
        }
        Ok(())
    }

    fn sorted_names(&self) -> Vec<String> {
        let mut keyed: Vec<((Category, &'static str, usize), String)> = self
            .bools
            .keys()
            .chain(self.ints.keys())
            .chain(self.floats.keys())
            .chain(self.colors.keys())
            .chain(self.paths.keys())
            .map(|name| {
                let key = match self.schema.lookup(name) {
                    Some(meta) => (meta.category, meta.name, set_index(name).unwrap_or(0)),
                    None => (Category::Default, "", 0),
                };
                (key, name.clone())
            })
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, name)| name).collect()
    }
}

fn unknown(name: &str) -> OptionError {
    OptionError::Unknown {
        name: name.to_string(),
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn non_finite(name: &str, value: String) -> OptionError {
    OptionError::Malformed {
        name: name.to_string(),
        value,
        expected: "a finite number",
    }
}

/// A path survives the one-line-per-entry text encoding unchanged.
fn storable_path(path: &str) -> bool {
    !path.is_empty() && path.trim() == path && !path.contains(['\n', '\r'])
}

/// Values beyond `i32` saturate so range checks still see them as out of range.
fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Clamp plain integers, reject keys and choices outside their range.
fn checked_int(meta: &OptionMeta, name: &str, v: i32) -> OptionResult<i32> {
    let (min, max) = meta.int_range();
    match meta.kind {
        OptionType::Key | OptionType::Other if !(min..=max).contains(&(v as i64)) => {
            Err(OptionError::OutOfRange {
                name: name.to_string(),
                value: v as i64,
                min,
                max,
            })
        }
        _ => Ok((v as i64).clamp(min, max) as i32),
    }
}

/// Set index of a `<field>.<index>` name.
pub(crate) fn set_index(name: &str) -> Option<usize> {
    name.rsplit_once('.').and_then(|(_, index)| index.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DEFAULT_SET_COUNT;

    #[test]
    fn every_binding_has_schema_metadata() {
        let store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        for name in registry.names() {
            assert!(registry.meta(name).is_ok(), "{name} has no metadata");
        }
    }

    #[test]
    fn every_schema_option_is_bound() {
        let store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        for meta in OptionSchema::builtin().all() {
            let name = match meta.category {
                Category::Default => meta.name.to_string(),
                Category::PerSet => format!("{}.0", meta.name),
            };
            assert!(registry.contains(&name), "{name} is not bound");
        }
    }

    #[test]
    fn per_set_entries_expand_by_index() {
        let mut store = ValueStore::default();
        store.resize_sets(3);
        let registry = BindingRegistry::derive(&store);
        assert!(registry.contains("keyboard.majorColor.2"));
        assert!(!registry.contains("keyboard.majorColor.3"));
        assert_eq!(registry.partition("notes.minorColors.0"), Some(Partition::Color));
    }

    #[test]
    fn float_is_clamped_to_range() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        registry
            .set(&mut store, "particles.scale", Value::Float(-5.0))
            .unwrap();
        assert_eq!(store.particles.scale, 0.0);
        registry
            .set(&mut store, "particles.scale", Value::Float(5.0))
            .unwrap();
        assert_eq!(store.particles.scale, 1.0);
    }

    #[test]
    fn int_is_clamped_but_key_is_rejected() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);

        registry
            .set(&mut store, "particles.count", Value::Int(100_000))
            .unwrap();
        assert_eq!(store.particles.count, 512);

        let err = registry
            .set(&mut store, "minKey", Value::Int(200))
            .unwrap_err();
        assert!(matches!(err, OptionError::OutOfRange { value: 200, .. }));
        assert_eq!(store.globals.min_key, 21);
    }

    #[test]
    fn choice_out_of_range_is_rejected() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        let err = registry
            .set(&mut store, "pedals.location", Value::Int(9))
            .unwrap_err();
        assert!(matches!(err, OptionError::OutOfRange { .. }));
        assert_eq!(store.pedals.location, 3);
    }

    #[test]
    fn wrong_variant_is_a_type_mismatch() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        let err = registry
            .set(&mut store, "showWave", Value::Float(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            OptionError::TypeMismatch {
                name: "showWave".to_string(),
                expected: "bool"
            }
        );
    }

    #[test]
    fn unknown_name_is_reported() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        assert!(registry.get(&store, "nope").unwrap_err().is_unknown());
        assert!(registry
            .set(&mut store, "nope", Value::Bool(true))
            .unwrap_err()
            .is_unknown());
    }

    #[test]
    fn stale_registry_is_refused() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        store.resize_sets(2);
        let err = registry.get(&store, "scale").unwrap_err();
        assert_eq!(
            err,
            OptionError::StaleBindings {
                derived: DEFAULT_SET_COUNT,
                actual: 2
            }
        );
    }

    #[test]
    fn oversized_ints_parse_saturated() {
        let store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        assert_eq!(
            registry.parse("maxKey", "99999999999").unwrap(),
            Value::Int(i32::MAX)
        );
        assert_eq!(
            registry.parse("minKey", "-99999999999").unwrap(),
            Value::Int(i32::MIN)
        );
    }

    #[test]
    fn set_count_write_resizes_the_bank() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        assert!(registry.set(&mut store, "sets.count", Value::Int(3)).unwrap());
        assert_eq!(store.set_count(), 3);
        assert_eq!(store.sets.count(), 3);
        for kind in SetColorKind::ALL {
            assert_eq!(store.set_colors(kind).len(), 3);
        }
        assert!(matches!(
            registry.get(&store, "scale"),
            Err(OptionError::StaleBindings { actual: 3, .. })
        ));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = registry.set(&mut store, "scale", Value::Float(v)).unwrap_err();
            assert!(matches!(err, OptionError::Malformed { .. }), "{err:?}");
        }
        let err = registry
            .set(&mut store, "wave.color", Value::Color(Color::new(0.5, f32::NAN, 0.5)))
            .unwrap_err();
        assert!(matches!(err, OptionError::Malformed { .. }));
        assert_eq!(store, ValueStore::default());
    }

    #[test]
    fn unstorable_paths_are_rejected() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        let name = "particles.imagePaths";
        for bad in [" lead.png", "trail.png ", "", "two\nlines.png"] {
            let paths = vec!["ok.png".to_string(), bad.to_string()];
            let err = registry.set(&mut store, name, Value::Paths(paths)).unwrap_err();
            assert!(matches!(err, OptionError::Malformed { .. }), "{bad:?}");
        }
        assert_eq!(store, ValueStore::default());

        let inner = vec!["/tmp/with space.png".to_string()];
        assert!(registry.set(&mut store, name, Value::Paths(inner)).unwrap());
    }

    #[test]
    fn per_set_color_writes_reach_the_bank() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        let red = Color::new(1.0, 0.0, 0.0);
        assert!(registry
            .set(&mut store, "flashes.colors.4", Value::Color(red))
            .unwrap());
        assert_eq!(store.set_color(SetColorKind::Flashes, 4), Some(red));
        assert_eq!(
            registry.get(&store, "flashes.colors.4").unwrap(),
            Value::Color(red)
        );
    }

    #[test]
    fn choices_parse_by_name_or_ordinal_and_render_by_name() {
        let mut store = ValueStore::default();
        let registry = BindingRegistry::derive(&store);
        assert_eq!(registry.parse("quality", "high").unwrap(), Value::Int(3));
        assert_eq!(registry.parse("quality", "1").unwrap(), Value::Int(1));
        assert!(registry.parse("quality", "ultra").is_err());

        registry.set(&mut store, "quality", Value::Int(4)).unwrap();
        assert_eq!(registry.render(&store, "quality").unwrap(), vec!["HIGH_RES"]);
    }

    #[test]
    fn names_are_ordered_by_category_then_name_then_index() {
        let mut store = ValueStore::default();
        store.resize_sets(12);
        let registry = BindingRegistry::derive(&store);
        let names = registry.names();

        let first_per_set = names
            .iter()
            .position(|n| registry.meta(n).unwrap().category == Category::PerSet)
            .unwrap();
        assert!(names[first_per_set..]
            .iter()
            .all(|n| registry.meta(n).unwrap().category == Category::PerSet));

        let two = names.iter().position(|n| n == "flashes.colors.2").unwrap();
        let ten = names.iter().position(|n| n == "flashes.colors.10").unwrap();
        assert!(two < ten);
    }
}
