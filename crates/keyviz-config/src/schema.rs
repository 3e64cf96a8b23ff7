//! Option schema: the static catalogue of every known option.
//!
//! The schema is built once at startup and only read afterwards. The first
//! read seals it, after which [`OptionSchema::register`] is refused.

use crate::error::SchemaError;
use crate::quality::QUALITY_NAMES;
use crate::store::{PEDAL_LOCATIONS, SET_MODES};
use crate::value::{Category, OptionType};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Highest MIDI key index accepted by key options.
pub const KEY_MAX: f32 = 127.0;

/// Metadata describing one option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionMeta {
    /// Unique option name. Per-set options use their base name.
    pub name: &'static str,
    /// One-line description shown in help text.
    pub description: &'static str,
    /// Value type.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Legal `[min, max]`, meaningful for ranged types and choices.
    pub range: [f32; 2],
    /// Global or per-set.
    pub category: Category,
    /// Symbolic names of the choices of an `Other` option, by ordinal.
    #[serde(skip_serializing_if = "no_values")]
    pub values: &'static [&'static str],
}

impl OptionMeta {
    fn new(name: &'static str, description: &'static str, kind: OptionType) -> Self {
        Self {
            name,
            description,
            kind,
            range: [0.0, 0.0],
            category: Category::Default,
            values: &[],
        }
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, OptionType::Bool)
    }

    pub fn int(name: &'static str, description: &'static str, min: i32, max: i32) -> Self {
        Self {
            range: [min as f32, max as f32],
            ..Self::new(name, description, OptionType::Int)
        }
    }

    pub fn float(name: &'static str, description: &'static str, min: f32, max: f32) -> Self {
        Self {
            range: [min, max],
            ..Self::new(name, description, OptionType::Float)
        }
    }

    pub fn color(name: &'static str, description: &'static str) -> Self {
        Self {
            range: [0.0, 1.0],
            ..Self::new(name, description, OptionType::Color)
        }
    }

    pub fn path(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, OptionType::Path)
    }

    pub fn key(name: &'static str, description: &'static str) -> Self {
        Self {
            range: [0.0, KEY_MAX],
            ..Self::new(name, description, OptionType::Key)
        }
    }

    /// An enumerated option whose ordinal indexes `values`.
    pub fn choice(
        name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self {
            range: [0.0, values.len().saturating_sub(1) as f32],
            values,
            ..Self::new(name, description, OptionType::Other)
        }
    }

    /// Mark the option as one value per set.
    pub fn per_set(mut self) -> Self {
        self.category = Category::PerSet;
        self
    }

    /// Integer bounds of the range.
    pub fn int_range(&self) -> (i64, i64) {
        (self.range[0] as i64, self.range[1] as i64)
    }
}

fn no_values(values: &&'static [&'static str]) -> bool {
    values.is_empty()
}

/// Registry of option metadata, keyed by unique name.
#[derive(Debug, Default)]
pub struct OptionSchema {
    entries: Vec<OptionMeta>,
    index: HashMap<&'static str, usize>,
    sealed: AtomicBool,
}

static BUILTIN: Lazy<OptionSchema> = Lazy::new(|| {
    builtin_schema().unwrap_or_else(|err| panic!("invalid built-in option schema: {err}"))
});

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide catalogue of visualizer options.
    pub fn builtin() -> &'static OptionSchema {
        &BUILTIN
    }

    /// Add an option. Fails on duplicates and once the schema has been read.
    pub fn register(&mut self, meta: OptionMeta) -> Result<(), SchemaError> {
        if self.sealed.load(Ordering::Acquire) {
            return Err(SchemaError::Sealed {
                name: meta.name.to_string(),
            });
        }
        if self.index.contains_key(meta.name) {
            return Err(SchemaError::Duplicate {
                name: meta.name.to_string(),
            });
        }
        self.index.insert(meta.name, self.entries.len());
        self.entries.push(meta);
        Ok(())
    }

    /// Resolve a name, accepting `<base>.<index>` for per-set options.
    pub fn lookup(&self, name: &str) -> Option<&OptionMeta> {
        self.seal();
        if let Some(&i) = self.index.get(name) {
            return Some(&self.entries[i]);
        }
        let (base, index) = name.rsplit_once('.')?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.index
            .get(base)
            .map(|&i| &self.entries[i])
            .filter(|meta| meta.category == Category::PerSet)
    }

    /// Every option, default category first, then per-set, each in insertion order.
    pub fn all(&self) -> Vec<&OptionMeta> {
        self.seal();
        let mut all: Vec<&OptionMeta> = self.entries.iter().collect();
        // stable sort keeps insertion order inside a category
        all.sort_by_key(|meta| meta.category);
        all
    }

    /// Options of one category, in insertion order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &OptionMeta> {
        self.seal();
        self.entries
            .iter()
            .filter(move |meta| meta.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    fn seal(&self) {
        self.sealed.store(true, Ordering::Release);
    }
}

fn builtin_schema() -> Result<OptionSchema, SchemaError> {
    let mut schema = OptionSchema::new();
    for meta in builtin_options() {
        schema.register(meta)?;
    }
    Ok(schema)
}

#[rustfmt::skip]
fn builtin_options() -> Vec<OptionMeta> {
    use OptionMeta as M;
    vec![
        // Background
        M::color("background.color", "Background color"),
        M::color("background.linesColor", "Score lines color"),
        M::color("background.textColor", "Score text color"),
        M::color("background.keysColor", "Black keys color"),
        M::float("background.minorsWidth", "Width of minor keys and notes relative to major ones", 0.1, 1.0),
        M::boolean("background.hLines", "Show horizontal score lines"),
        M::boolean("background.vLines", "Show vertical score lines"),
        M::boolean("background.digits", "Show score numbers"),
        M::boolean("background.image", "Use the background image"),
        M::boolean("background.imageBehindKeyboard", "Let the background image extend behind the keyboard"),
        M::float("background.imageAlpha", "Background image opacity", 0.0, 1.0),
        M::path("background.imagePath", "Path to an image on disk to use as background"),
        // Particles
        M::path("particles.imagePaths", "Paths to images on disk to use as particles"),
        M::float("particles.speed", "Particles speed", 0.0, 1.0),
        M::float("particles.expansion", "Particles expansion factor", 0.0, 5.0),
        M::float("particles.scale", "Particles size", 0.0, 1.0),
        M::int("particles.count", "Number of particles emitted per note", 1, 512),
        // Keyboard
        M::float("keyboard.size", "Vertical size of the keyboard, starting from the bottom", 0.0, 1.0),
        M::float("keyboard.minorHeight", "Fraction of the keyboard height taken by minor keys", 0.0, 1.0),
        M::boolean("keyboard.highlightKeys", "Highlight pressed keys"),
        M::boolean("keyboard.customKeyColors", "Use the keyboard colors instead of the note colors"),
        M::boolean("keyboard.minorEdges", "Draw edges around minor keys"),
        // Pedals
        M::color("pedals.color", "Pedals color"),
        M::choice("pedals.location", "Screen corner of the pedals display", PEDAL_LOCATIONS),
        M::float("pedals.size", "Pedals display size", 0.05, 0.5),
        M::float("pedals.opacity", "Opacity of released pedals", 0.0, 1.0),
        M::boolean("pedals.merge", "Display all pedals as a single shape"),
        // Wave
        M::color("wave.color", "Wave color"),
        M::float("wave.opacity", "Wave opacity", 0.0, 1.0),
        M::float("wave.spread", "Wave thickness", 0.0, 5.0),
        M::float("wave.amplitude", "Wave amplitude", 0.0, 5.0),
        M::float("wave.frequency", "Wave frequency", 0.0, 5.0),
        // Notes
        M::path("notes.majorImagePath", "Path to an image on disk to use as texture for major notes"),
        M::path("notes.minorImagePath", "Path to an image on disk to use as texture for minor notes"),
        M::float("notes.fadeOut", "Notes fade out at the top of the screen", 0.0, 1.0),
        M::float("notes.edgeWidth", "Width of the edges around notes", 0.0, 1.0),
        M::float("notes.edgeBrightness", "Brightness factor applied to note edges", 0.0, 4.0),
        M::float("notes.cornerRadius", "Rounding radius of note corners", 0.0, 1.0),
        M::float("notes.majorTexScale", "Scale of the major notes texture", 0.1, 10.0),
        M::float("notes.minorTexScale", "Scale of the minor notes texture", 0.1, 10.0),
        M::float("notes.majorTexAlpha", "Intensity of the major notes texture", 0.0, 1.0),
        M::float("notes.minorTexAlpha", "Intensity of the minor notes texture", 0.0, 1.0),
        M::boolean("notes.majorTexScroll", "Scroll the major notes texture with the notes"),
        M::boolean("notes.minorTexScroll", "Scroll the minor notes texture with the notes"),
        // Flashes
        M::float("flashes.size", "Flashes size", 0.1, 3.0),
        // Sets
        M::int("sets.count", "Number of color sets", 1, crate::store::MAX_SETS as i32),
        M::choice("sets.mode", "How notes are assigned to sets", SET_MODES),
        M::key("sets.separatorKey", "Key separating the two sets in split mode"),
        // Globals
        M::choice("quality", "Rendering quality preset", &QUALITY_NAMES),
        M::float("scale", "Vertical display scale", 0.01, 10.0),
        M::float("attenuation", "Blur attenuation speed", 0.0, 1.0),
        M::float("prerollTime", "Delay before the track starts, in seconds", 0.0, 20.0),
        M::float("scrollSpeed", "Playback speed", -10.0, 10.0),
        M::key("minKey", "Lowest key to display"),
        M::key("maxKey", "Highest key to display"),
        // Flags
        M::boolean("showParticles", "Show particles"),
        M::boolean("showFlashes", "Show flashes"),
        M::boolean("showBlur", "Show the blur effect"),
        M::boolean("showBlurNotes", "Include notes in the blur effect"),
        M::boolean("lockParticleColor", "Use the note color for particles"),
        M::boolean("showNotes", "Show notes"),
        M::boolean("showScore", "Show the score background"),
        M::boolean("showKeyboard", "Show the keyboard"),
        M::boolean("perSetColors", "Use a distinct color for each set"),
        M::boolean("showPedal", "Show pedals"),
        M::boolean("showWave", "Show the wave"),
        M::boolean("applyAA", "Apply anti-aliasing"),
        M::boolean("reverseScroll", "Scroll notes towards the top"),
        M::boolean("horizontalScroll", "Scroll notes horizontally"),
        // Per set
        M::color("keyboard.majorColor", "Major key pressed color").per_set(),
        M::color("keyboard.minorColor", "Minor key pressed color").per_set(),
        M::color("particles.colors", "Particles color").per_set(),
        M::color("notes.majorColors", "Major notes color").per_set(),
        M::color("notes.minorColors", "Minor notes color").per_set(),
        M::color("flashes.colors", "Flashes color").per_set(),
    ]
}
