//! Translation of option names and values written by older file versions.
//!
//! Each rule applies to files older than its `before` version. Rules are
//! evaluated in table order and all matching rules apply, so a rename can be
//! followed by a transform of the renamed option. Adding a new format break
//! means appending a rule here.

use crate::schema::OptionSchema;
use crate::value::{parse_int, Category, Color, Value};
use std::fmt;

/// `MAJOR.MINOR` version stamp of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion {
    pub major: u32,
    pub minor: u32,
}

impl FormatVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse `MAJOR MINOR` or `MAJOR.MINOR`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line
            .split(|c: char| c == '.' || c.is_whitespace())
            .filter(|part| !part.is_empty());
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor))
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Version written by this code.
pub const CURRENT_VERSION: FormatVersion = FormatVersion::new(7, 1);

/// Rewrites a parsed value. Receives the raw text the value was parsed from.
pub type ValueTransform = fn(Value, &str) -> Value;

/// Which option names a rule applies to.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    Exact(&'static str),
    /// A per-set option written without a set index.
    PerSetBase,
    Any,
}

/// What a matching rule does.
#[derive(Clone, Copy)]
pub enum Translation {
    /// The option now has another name; the value is unchanged.
    Rename(&'static str),
    /// The value is reinterpreted under the current semantics.
    Transform(ValueTransform),
    /// The old single value now applies to every set.
    Broadcast,
    /// The option was removed.
    Drop,
}

impl fmt::Debug for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::Rename(to) => write!(f, "Rename({to})"),
            Translation::Transform(_) => write!(f, "Transform"),
            Translation::Broadcast => write!(f, "Broadcast"),
            Translation::Drop => write!(f, "Drop"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LegacyRule {
    /// Applies to files strictly older than this version.
    pub before: FormatVersion,
    pub pattern: Pattern,
    pub translation: Translation,
}

const fn rule(major: u32, minor: u32, pattern: Pattern, translation: Translation) -> LegacyRule {
    LegacyRule {
        before: FormatVersion::new(major, minor),
        pattern,
        translation,
    }
}

/// Built-in translation table.
pub static LEGACY_RULES: &[LegacyRule] = &[
    rule(3, 0, Pattern::Any, Translation::Transform(color_from_bytes)),
    rule(4, 0, Pattern::Exact("bgImageAlpha"), Translation::Rename("background.imageAlpha")),
    rule(5, 0, Pattern::Exact("particles.texCount"), Translation::Drop),
    rule(6, 0, Pattern::Exact("timeScale"), Translation::Rename("scale")),
    rule(6, 0, Pattern::PerSetBase, Translation::Broadcast),
    rule(7, 0, Pattern::Exact("quality"), Translation::Transform(quality_before_low_res)),
    rule(7, 0, Pattern::Exact("particlesResolution"), Translation::Drop),
    rule(7, 0, Pattern::Exact("blurResolution"), Translation::Drop),
    rule(7, 0, Pattern::Exact("finalResolution"), Translation::Drop),
];

/// Colors used to be written with 0-255 channels.
fn color_from_bytes(value: Value, _raw: &str) -> Value {
    match value {
        Value::Color(c) => Value::Color(Color::new(c.r / 255.0, c.g / 255.0, c.b / 255.0)),
        other => other,
    }
}

/// `LOW_RES` was inserted in front of the other quality levels. Only
/// ordinals moved; symbolic names already resolve against the current list.
fn quality_before_low_res(value: Value, raw: &str) -> Value {
    match value {
        Value::Int(level) if parse_int(raw).is_some() => {
            Value::Int(level.saturating_add(1))
        }
        other => other,
    }
}

/// Outcome of running an old option name through the rule table.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Recognized but removed.
    Dropped,
    /// Apply to `target` (or every `target.<index>` when broadcast), after
    /// passing the parsed value through `transforms`.
    Apply {
        target: String,
        broadcast: bool,
        transforms: Vec<ValueTransform>,
    },
}

impl Resolution {
    /// Run `value`, parsed from `raw`, through the collected transforms.
    pub fn transform(&self, value: Value, raw: &str) -> Value {
        match self {
            Resolution::Dropped => value,
            Resolution::Apply { transforms, .. } => transforms
                .iter()
                .fold(value, |value, transform| transform(value, raw)),
        }
    }
}

/// Resolve `name` as written by a file of `version` using `rules`.
pub fn translate(
    rules: &[LegacyRule],
    schema: &OptionSchema,
    version: FormatVersion,
    name: &str,
) -> Resolution {
    let mut target = name.to_string();
    let mut broadcast = false;
    let mut transforms = Vec::new();

    for rule in rules.iter().filter(|rule| version < rule.before) {
        let matches = match rule.pattern {
            Pattern::Exact(old) => target == old,
            Pattern::PerSetBase => schema
                .lookup(&target)
                .is_some_and(|meta| meta.category == Category::PerSet && meta.name == target),
            Pattern::Any => true,
        };
        if !matches {
            continue;
        }
        match rule.translation {
            Translation::Rename(new) => target = new.to_string(),
            Translation::Transform(transform) => transforms.push(transform),
            Translation::Broadcast => broadcast = true,
            Translation::Drop => return Resolution::Dropped,
        }
    }

    Resolution::Apply {
        target,
        broadcast,
        transforms,
    }
}
