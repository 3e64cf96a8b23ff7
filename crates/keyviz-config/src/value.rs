//! Option value types and their text encoding.

use serde::Serialize;
use std::fmt;

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Same color with every channel clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Multiply every channel by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

/// Type tag carried by every option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Bool,
    Int,
    Float,
    Color,
    Path,
    /// Index of a keyboard key, rejected rather than clamped when out of range.
    Key,
    /// Enumerated choice stored as an ordinal, written by name.
    Other,
}

impl OptionType {
    /// Short label used in help text and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            OptionType::Bool => "boolean",
            OptionType::Int => "integer",
            OptionType::Float => "number",
            OptionType::Color => "color",
            OptionType::Path => "path",
            OptionType::Key => "key",
            OptionType::Other => "choice",
        }
    }

    /// Whether the option range is meaningful for this type.
    pub fn is_ranged(&self) -> bool {
        matches!(self, OptionType::Int | OptionType::Float | OptionType::Key)
    }
}

/// Whether an option is a single global value or one value per set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Default,
    PerSet,
}

/// A dynamically typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Color(Color),
    Paths(Vec<String>),
}

impl Value {
    /// Name of the partition this value belongs to.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Color(_) => "color",
            Value::Paths(_) => "path",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

/// Parse a boolean written as `0/1`, `true/false`, `yes/no` or `on/off`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a decimal integer.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a finite decimal number.
pub fn parse_float(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Parse three channels separated by spaces and/or commas.
pub fn parse_color(raw: &str) -> Option<Color> {
    let channels: Vec<f32> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(parse_float)
        .collect::<Option<Vec<_>>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(Color::new(*r, *g, *b)),
        _ => None,
    }
}

/// Encode a boolean the way settings files store it.
pub fn format_bool(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}
