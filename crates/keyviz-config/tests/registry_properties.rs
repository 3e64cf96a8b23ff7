//! Property tests for the settings registry.
//!
//! Random sequences of writes through the public mutators must survive a
//! save/load cycle unchanged, and resizing must keep every per-set array in
//! step with the set count.

use keyviz_config::{codec, merge, Color, SetColorKind, Settings, Value};
use proptest::prelude::*;

// ============================================================================
// GENERATORS
// ============================================================================

#[derive(Debug, Clone)]
enum Write {
    Float(&'static str, f32),
    Int(&'static str, i32),
    Bool(&'static str, bool),
    Color(&'static str, Color),
    SetColor(SetColorKind, usize, Color),
    Paths(&'static str, Vec<String>),
    Choice(&'static str, i32),
    Resize(usize),
}

const FLOATS: &[&str] = &[
    "scale",
    "particles.scale",
    "scrollSpeed",
    "notes.edgeWidth",
    "wave.amplitude",
    "keyboard.size",
];
const INTS: &[&str] = &["particles.count", "minKey", "maxKey", "sets.separatorKey"];
const BOOLS: &[&str] = &["showWave", "showBlurNotes", "background.digits", "pedals.merge"];
const COLORS: &[&str] = &["background.color", "wave.color", "pedals.color"];
const PATHS: &[&str] = &[
    "background.imagePath",
    "particles.imagePaths",
    "notes.majorImagePath",
];
const CHOICES: &[&str] = &["quality", "pedals.location", "sets.mode"];

/// Mostly in-range values, with the non-finite ones a UI slider could produce.
fn float_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -20.0f32..20.0,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
        1 => Just(f32::NEG_INFINITY),
    ]
}

fn color_strategy() -> impl Strategy<Value = Color> {
    (float_strategy(), -0.5f32..1.5, -0.5f32..1.5).prop_map(|(r, g, b)| Color::new(r, g, b))
}

fn kind_strategy() -> impl Strategy<Value = SetColorKind> {
    prop::sample::select(SetColorKind::ALL.to_vec())
}

fn write_strategy() -> impl Strategy<Value = Write> {
    prop_oneof![
        (prop::sample::select(FLOATS), float_strategy()).prop_map(|(n, v)| Write::Float(n, v)),
        (prop::sample::select(INTS), 0i32..128).prop_map(|(n, v)| Write::Int(n, v)),
        (1i32..=64).prop_map(|v| Write::Int("sets.count", v)),
        (prop::sample::select(BOOLS), any::<bool>()).prop_map(|(n, v)| Write::Bool(n, v)),
        (prop::sample::select(COLORS), color_strategy()).prop_map(|(n, c)| Write::Color(n, c)),
        (kind_strategy(), 0usize..64, color_strategy())
            .prop_map(|(k, i, c)| Write::SetColor(k, i, c)),
        (
            prop::sample::select(PATHS),
            prop::collection::vec("[a-z ]{0,2}[a-z]{1,8}(/[a-z ]{1,8}){0,2}\\.png ?", 0..3)
        )
            .prop_map(|(n, p)| Write::Paths(n, p)),
        (prop::sample::select(CHOICES), 0i32..4).prop_map(|(n, v)| Write::Choice(n, v)),
        (1usize..=64).prop_map(Write::Resize),
    ]
}

/// Apply a write, ignoring rejections the way an interactive UI would.
fn perform(settings: &mut Settings, write: Write) {
    let _ = match write {
        Write::Float(name, v) => settings.set(name, Value::Float(v)),
        Write::Int(name, v) => settings.set(name, Value::Int(v)),
        Write::Bool(name, v) => settings.set(name, Value::Bool(v)),
        Write::Color(name, c) => settings.set(name, Value::Color(c)),
        Write::SetColor(kind, index, c) => {
            let name = format!("{}.{}", kind.option_name(), index);
            settings.set(&name, Value::Color(c))
        }
        Write::Paths(name, paths) => settings.set(name, Value::Paths(paths)),
        Write::Choice(name, v) => settings.set(name, Value::Int(v)),
        Write::Resize(count) => {
            settings.resize_sets(count);
            Ok(())
        }
    };
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn save_then_load_restores_store(writes in prop::collection::vec(write_strategy(), 0..40)) {
        let mut settings = Settings::new();
        for write in writes {
            perform(&mut settings, write);
        }

        let text = codec::save(&settings);
        let report = codec::load(&text).unwrap();
        prop_assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
        prop_assert_eq!(report.settings.store(), settings.store());
    }

    #[test]
    fn save_is_deterministic(writes in prop::collection::vec(write_strategy(), 0..20)) {
        let mut settings = Settings::new();
        for write in writes {
            perform(&mut settings, write);
        }
        prop_assert_eq!(codec::save(&settings), codec::save(&settings));
    }

    #[test]
    fn resize_keeps_every_set_array_in_step(counts in prop::collection::vec(0usize..100, 1..10)) {
        let mut settings = Settings::new();
        for count in counts {
            let applied = settings.resize_sets(count);
            prop_assert_eq!(applied, count.clamp(1, 64));
            for kind in SetColorKind::ALL {
                prop_assert_eq!(settings.store().set_colors(kind).len(), applied);
            }
            prop_assert_eq!(settings.bindings().set_count(), applied);

            // resizing to the same count again changes nothing
            let before = settings.store().clone();
            settings.resize_sets(applied);
            prop_assert_eq!(settings.store(), &before);
        }
    }

    #[test]
    fn last_override_wins(values in prop::collection::vec(0.01f32..10.0, 1..6)) {
        let mut settings = Settings::new();
        let overrides: Vec<(&str, String)> =
            values.iter().map(|v| ("scale", v.to_string())).collect();
        let diagnostics = merge::apply(&mut settings, &overrides);
        prop_assert!(diagnostics.is_empty());
        prop_assert_eq!(settings.store().globals.scale, *values.last().unwrap());
    }
}

#[test]
fn reset_is_idempotent() {
    let mut settings = Settings::new();
    settings.set_from_str("scale", "4").unwrap();
    settings.resize_sets(3);

    settings.reset();
    let once = settings.store().clone();
    settings.reset();
    assert_eq!(settings.store(), &once);
    assert_eq!(once.set_count(), 12);
}
