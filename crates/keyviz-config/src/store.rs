//! Value store: the typed settings aggregate read by rendering passes.
//!
//! Per-set colors are owned by a single [`ColorBank`]. Sub-states reach their
//! per-set colors through it, so every per-set array always has the same
//! length.

use crate::quality::{Quality, QualityLevel};
use crate::value::Color;

/// Number of sets a fresh store holds.
pub const DEFAULT_SET_COUNT: usize = 12;

/// Upper bound for the set count.
pub const MAX_SETS: usize = 64;

/// Choices of `pedals.location`, by ordinal.
pub const PEDAL_LOCATIONS: &[&str] = &["TOPLEFT", "BOTTOMLEFT", "TOPRIGHT", "BOTTOMRIGHT"];

/// Choices of `sets.mode`, by ordinal.
pub const SET_MODES: &[&str] = &["CHANNEL", "TRACK", "SPLIT", "KEY"];

/// Opaque identifier assigned by the renderer to an uploaded image.
pub type ResourceHandle = u32;

/// A list of image paths plus the handle of its uploaded resource, if any.
///
/// Handles are runtime state owned by the renderer: they never reach the
/// settings file and do not take part in equality.
#[derive(Debug, Clone, Default)]
pub struct ImageSource {
    paths: Vec<String>,
    handle: Option<ResourceHandle>,
}

impl ImageSource {
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Replace the path list. A different list invalidates the handle.
    pub fn replace(&mut self, paths: Vec<String>) -> bool {
        if self.paths == paths {
            return false;
        }
        self.paths = paths;
        self.handle = None;
        true
    }

    pub fn handle(&self) -> Option<ResourceHandle> {
        self.handle
    }

    pub fn attach_handle(&mut self, handle: ResourceHandle) {
        self.handle = Some(handle);
    }

    pub fn detach_handle(&mut self) -> Option<ResourceHandle> {
        self.handle.take()
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        self.paths == other.paths
    }
}

/// Identifies one per-set color field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetColorKind {
    KeyboardMajor,
    KeyboardMinor,
    Particles,
    NotesMajor,
    NotesMinor,
    Flashes,
}

impl SetColorKind {
    pub const ALL: [SetColorKind; 6] = [
        SetColorKind::KeyboardMajor,
        SetColorKind::KeyboardMinor,
        SetColorKind::Particles,
        SetColorKind::NotesMajor,
        SetColorKind::NotesMinor,
        SetColorKind::Flashes,
    ];

    /// Base option name; bindings append `.<index>`.
    pub fn option_name(self) -> &'static str {
        match self {
            SetColorKind::KeyboardMajor => "keyboard.majorColor",
            SetColorKind::KeyboardMinor => "keyboard.minorColor",
            SetColorKind::Particles => "particles.colors",
            SetColorKind::NotesMajor => "notes.majorColors",
            SetColorKind::NotesMinor => "notes.minorColors",
            SetColorKind::Flashes => "flashes.colors",
        }
    }
}

/// All colors of one set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetColors {
    pub keyboard_major: Color,
    pub keyboard_minor: Color,
    pub particles: Color,
    pub notes_major: Color,
    pub notes_minor: Color,
    pub flashes: Color,
}

impl Default for SetColors {
    fn default() -> Self {
        let major = Color::new(0.0, 0.5, 1.0);
        let minor = major.scaled(0.8);
        Self {
            keyboard_major: major,
            keyboard_minor: minor,
            particles: major,
            notes_major: major,
            notes_minor: minor,
            flashes: major,
        }
    }
}

impl SetColors {
    pub fn get(&self, kind: SetColorKind) -> Color {
        match kind {
            SetColorKind::KeyboardMajor => self.keyboard_major,
            SetColorKind::KeyboardMinor => self.keyboard_minor,
            SetColorKind::Particles => self.particles,
            SetColorKind::NotesMajor => self.notes_major,
            SetColorKind::NotesMinor => self.notes_minor,
            SetColorKind::Flashes => self.flashes,
        }
    }

    pub fn get_mut(&mut self, kind: SetColorKind) -> &mut Color {
        match kind {
            SetColorKind::KeyboardMajor => &mut self.keyboard_major,
            SetColorKind::KeyboardMinor => &mut self.keyboard_minor,
            SetColorKind::Particles => &mut self.particles,
            SetColorKind::NotesMajor => &mut self.notes_major,
            SetColorKind::NotesMinor => &mut self.notes_minor,
            SetColorKind::Flashes => &mut self.flashes,
        }
    }
}

/// Set-indexed storage for every per-set color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBank {
    sets: Vec<SetColors>,
}

impl ColorBank {
    fn with_len(len: usize) -> Self {
        Self {
            sets: vec![SetColors::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SetColors> {
        self.sets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SetColors> {
        self.sets.get_mut(index)
    }

    /// One color field across every set.
    pub fn column(&self, kind: SetColorKind) -> Vec<Color> {
        self.sets.iter().map(|set| set.get(kind)).collect()
    }

    fn resize(&mut self, len: usize) {
        self.sets.resize(len, SetColors::default());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundState {
    /// Background image (only the first path is used).
    pub image_source: ImageSource,
    pub color: Color,
    pub lines_color: Color,
    pub text_color: Color,
    /// Black keys color.
    pub keys_color: Color,
    pub minors_width: f32,
    pub h_lines: bool,
    pub v_lines: bool,
    pub digits: bool,
    pub image: bool,
    pub image_behind_keyboard: bool,
    pub image_alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticlesState {
    pub images: ImageSource,
    pub speed: f32,
    pub expansion: f32,
    pub scale: f32,
    pub count: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardState {
    pub size: f32,
    pub minor_height: f32,
    pub highlight_keys: bool,
    pub custom_key_colors: bool,
    pub minor_edges: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PedalsState {
    pub color: Color,
    /// Index into [`PEDAL_LOCATIONS`].
    pub location: i32,
    pub size: f32,
    pub opacity: f32,
    pub merge: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    pub color: Color,
    pub opacity: f32,
    pub spread: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotesState {
    pub major_image: ImageSource,
    pub minor_image: ImageSource,
    pub fade_out: f32,
    pub edge_width: f32,
    pub edge_brightness: f32,
    pub corner_radius: f32,
    pub major_tex_scale: f32,
    pub minor_tex_scale: f32,
    pub major_tex_alpha: f32,
    pub minor_tex_alpha: f32,
    pub major_tex_scroll: bool,
    pub minor_tex_scroll: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlashesState {
    pub size: f32,
}

/// How notes are distributed over sets.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOptions {
    pub(crate) count: i32,
    /// Index into [`SET_MODES`].
    pub mode: i32,
    pub separator_key: i32,
}

impl SetOptions {
    pub fn count(&self) -> usize {
        self.count as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalScalars {
    /// Ordinal of the active [`QualityLevel`].
    pub quality: i32,
    pub scale: f32,
    pub attenuation: f32,
    pub preroll_time: f32,
    pub scroll_speed: f32,
    pub min_key: i32,
    pub max_key: i32,
    pub particles_resolution: f32,
    pub blur_resolution: f32,
    pub final_resolution: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalFlags {
    pub show_particles: bool,
    pub show_flashes: bool,
    pub show_blur: bool,
    pub show_blur_notes: bool,
    pub lock_particle_color: bool,
    pub show_notes: bool,
    pub show_score: bool,
    pub show_keyboard: bool,
    pub per_set_colors: bool,
    pub show_pedal: bool,
    pub show_wave: bool,
    pub apply_aa: bool,
    pub reverse_scroll: bool,
    pub horizontal_scroll: bool,
}

/// Every visualizer setting.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueStore {
    pub background: BackgroundState,
    pub particles: ParticlesState,
    pub keyboard: KeyboardState,
    pub pedals: PedalsState,
    pub wave: WaveState,
    pub notes: NotesState,
    pub flashes: FlashesState,
    pub sets: SetOptions,
    pub globals: GlobalScalars,
    pub flags: GlobalFlags,
    pub(crate) bank: ColorBank,
}

impl Default for ValueStore {
    fn default() -> Self {
        let mut store = Self {
            background: BackgroundState {
                image_source: ImageSource::default(),
                color: Color::BLACK,
                lines_color: Color::new(0.25, 0.25, 0.25),
                text_color: Color::WHITE,
                keys_color: Color::BLACK,
                minors_width: 0.8,
                h_lines: true,
                v_lines: true,
                digits: true,
                image: false,
                image_behind_keyboard: false,
                image_alpha: 1.0,
            },
            particles: ParticlesState {
                images: ImageSource::default(),
                speed: 0.2,
                expansion: 1.0,
                scale: 0.5,
                count: 256,
            },
            keyboard: KeyboardState {
                size: 0.25,
                minor_height: 0.6,
                highlight_keys: true,
                custom_key_colors: false,
                minor_edges: true,
            },
            pedals: PedalsState {
                color: Color::new(0.2, 0.2, 0.2),
                location: 3,
                size: 0.2,
                opacity: 0.4,
                merge: false,
            },
            wave: WaveState {
                color: Color::WHITE,
                opacity: 1.0,
                spread: 1.0,
                amplitude: 1.0,
                frequency: 1.0,
            },
            notes: NotesState {
                major_image: ImageSource::default(),
                minor_image: ImageSource::default(),
                fade_out: 0.0,
                edge_width: 0.05,
                edge_brightness: 1.05,
                corner_radius: 0.09,
                major_tex_scale: 1.0,
                minor_tex_scale: 1.0,
                major_tex_alpha: 1.0,
                minor_tex_alpha: 1.0,
                major_tex_scroll: true,
                minor_tex_scroll: true,
            },
            flashes: FlashesState { size: 1.0 },
            sets: SetOptions {
                count: DEFAULT_SET_COUNT as i32,
                mode: 0,
                separator_key: 64,
            },
            globals: GlobalScalars {
                quality: QualityLevel::Medium.ordinal(),
                scale: 0.5,
                attenuation: 0.99,
                preroll_time: 1.0,
                scroll_speed: 1.0,
                min_key: 21,
                max_key: 108,
                particles_resolution: 0.0,
                blur_resolution: 0.0,
                final_resolution: 0.0,
            },
            flags: GlobalFlags {
                show_particles: true,
                show_flashes: true,
                show_blur: true,
                show_blur_notes: false,
                lock_particle_color: true,
                show_notes: true,
                show_score: true,
                show_keyboard: true,
                per_set_colors: false,
                show_pedal: true,
                show_wave: true,
                apply_aa: false,
                reverse_scroll: false,
                horizontal_scroll: false,
            },
            bank: ColorBank::with_len(DEFAULT_SET_COUNT),
        };
        store.apply_quality();
        store
    }
}

impl ValueStore {
    /// Restore every field, set count included, to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_count(&self) -> usize {
        self.bank.len()
    }

    /// Truncate or extend every per-set array to `count` sets.
    ///
    /// The count is clamped to `[1, MAX_SETS]`; new sets get the default
    /// colors. Returns the count actually applied.
    pub fn resize_sets(&mut self, count: usize) -> usize {
        let count = count.clamp(1, MAX_SETS);
        self.bank.resize(count);
        self.sets.count = count as i32;
        count
    }

    pub fn color_bank(&self) -> &ColorBank {
        &self.bank
    }

    /// One per-set color field across all sets.
    pub fn set_colors(&self, kind: SetColorKind) -> Vec<Color> {
        self.bank.column(kind)
    }

    pub fn set_color(&self, kind: SetColorKind, index: usize) -> Option<Color> {
        self.bank.get(index).map(|set| set.get(kind))
    }

    pub fn quality_level(&self) -> QualityLevel {
        QualityLevel::from_ordinal(self.globals.quality).unwrap_or(QualityLevel::Medium)
    }

    /// Copy the resolution factors of the stored quality level into the globals.
    pub fn apply_quality(&mut self) {
        let preset = Quality::by_level(self.quality_level());
        self.globals.particles_resolution = preset.particles_resolution;
        self.globals.blur_resolution = preset.blur_resolution;
        self.globals.final_resolution = preset.final_resolution;
    }

    /// Every image source, for collaborators that manage resource handles.
    pub fn image_sources_mut(&mut self) -> [&mut ImageSource; 4] {
        [
            &mut self.background.image_source,
            &mut self.particles.images,
            &mut self.notes.major_image,
            &mut self.notes.minor_image,
        ]
    }
}
