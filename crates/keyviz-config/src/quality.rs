//! Rendering quality presets.

use serde::Serialize;

/// Ordinal quality level, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityLevel {
    LowRes = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    HighRes = 4,
}

impl QualityLevel {
    /// All levels in ascending order.
    pub const ALL: [QualityLevel; 5] = [
        QualityLevel::LowRes,
        QualityLevel::Low,
        QualityLevel::Medium,
        QualityLevel::High,
        QualityLevel::HighRes,
    ];

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn ordinal(self) -> i32 {
        self as i32
    }
}

/// Resolution factors applied for one quality level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quality {
    pub level: QualityLevel,
    pub name: &'static str,
    pub particles_resolution: f32,
    pub blur_resolution: f32,
    pub final_resolution: f32,
}

const PRESETS: [Quality; 5] = [
    Quality::preset(QualityLevel::LowRes, "LOW_RES", 0.25, 0.25, 0.5),
    Quality::preset(QualityLevel::Low, "LOW", 0.25, 0.5, 1.0),
    Quality::preset(QualityLevel::Medium, "MEDIUM", 0.5, 0.5, 1.0),
    Quality::preset(QualityLevel::High, "HIGH", 0.5, 1.0, 1.0),
    Quality::preset(QualityLevel::HighRes, "HIGH_RES", 1.0, 1.0, 2.0),
];

/// Preset names in ordinal order, as used by the `quality` option.
pub const QUALITY_NAMES: [&str; 5] = ["LOW_RES", "LOW", "MEDIUM", "HIGH", "HIGH_RES"];

impl Quality {
    const fn preset(
        level: QualityLevel,
        name: &'static str,
        particles_resolution: f32,
        blur_resolution: f32,
        final_resolution: f32,
    ) -> Self {
        Self {
            level,
            name,
            particles_resolution,
            blur_resolution,
            final_resolution,
        }
    }

    /// The full preset table, ordered by level.
    pub fn all() -> &'static [Quality] {
        &PRESETS
    }

    pub fn by_level(level: QualityLevel) -> &'static Quality {
        &PRESETS[level as usize]
    }

    /// Case-insensitive lookup by preset name.
    pub fn by_name(name: &str) -> Option<&'static Quality> {
        PRESETS.iter().find(|q| q.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Quality {
    fn default() -> Self {
        *Quality::by_level(QualityLevel::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_level() {
        for level in QualityLevel::ALL {
            assert_eq!(Quality::by_level(level).level, level);
        }
    }

    #[test]
    fn names_match_table() {
        for (quality, name) in Quality::all().iter().zip(QUALITY_NAMES) {
            assert_eq!(quality.name, name);
            assert_eq!(Quality::by_name(name), Some(quality));
        }
        assert_eq!(
            Quality::by_name("high_res").map(|q| q.level),
            Some(QualityLevel::HighRes)
        );
        assert!(Quality::by_name("ULTRA").is_none());
    }

    #[test]
    fn ordinals_round_trip() {
        assert_eq!(QualityLevel::from_ordinal(3), Some(QualityLevel::High));
        assert_eq!(QualityLevel::from_ordinal(5), None);
        assert_eq!(QualityLevel::from_ordinal(-1), None);
        assert!(QualityLevel::LowRes < QualityLevel::HighRes);
    }
}
