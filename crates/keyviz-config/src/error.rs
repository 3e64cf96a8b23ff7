//! Error and diagnostic types for the settings registry.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building an option schema.
///
/// These are programming errors: the built-in schema panics on them at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The same option name was registered twice.
    #[error("option '{name}' is registered twice")]
    Duplicate {
        /// The duplicated option name
        name: String,
    },

    /// Registration attempted after the schema was first read.
    #[error("cannot register '{name}': schema is sealed after first lookup")]
    Sealed {
        /// The option that was being registered
        name: String,
    },
}

/// Errors raised when reading or writing a single option.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionError {
    /// No binding carries this name.
    #[error("unknown option '{name}'")]
    Unknown {
        /// The name that could not be resolved
        name: String,
    },

    /// The raw text could not be parsed for the option type.
    #[error("invalid value '{value}' for option '{name}' (expected {expected})")]
    Malformed {
        /// Option name
        name: String,
        /// The raw value text
        value: String,
        /// Human-readable description of the expected syntax
        expected: &'static str,
    },

    /// A key or choice index outside of its legal range.
    #[error("value {value} for option '{name}' is outside [{min}, {max}]")]
    OutOfRange {
        /// Option name
        name: String,
        /// The rejected value
        value: i64,
        /// Lowest accepted value
        min: i64,
        /// Highest accepted value
        max: i64,
    },

    /// The value variant does not match the binding partition.
    #[error("option '{name}' expects a {expected} value")]
    TypeMismatch {
        /// Option name
        name: String,
        /// The partition the binding lives in
        expected: &'static str,
    },

    /// The bindings were derived for a different set count than the store has.
    #[error("bindings derived for {derived} sets used with a store holding {actual}")]
    StaleBindings {
        /// Set count the registry was derived from
        derived: usize,
        /// Set count of the store it was used with
        actual: usize,
    },
}

impl OptionError {
    /// Name of the option this error refers to, if any.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            OptionError::Unknown { name }
            | OptionError::Malformed { name, .. }
            | OptionError::OutOfRange { name, .. }
            | OptionError::TypeMismatch { name, .. } => Some(name),
            OptionError::StaleBindings { .. } => None,
        }
    }

    /// True for unknown-name errors, which callers often treat differently.
    pub fn is_unknown(&self) -> bool {
        matches!(self, OptionError::Unknown { .. })
    }
}

/// A non-fatal problem collected during a load or an override pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number for file input, `None` for overrides.
    pub line: Option<usize>,
    /// What went wrong.
    pub error: OptionError,
}

impl Diagnostic {
    /// Diagnostic tied to a line of a settings file.
    pub fn at_line(line: usize, error: OptionError) -> Self {
        Self {
            line: Some(line),
            error,
        }
    }

    /// Diagnostic without a source position.
    pub fn detached(error: OptionError) -> Self {
        Self { line: None, error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Errors that abort a whole load or save.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The text holds no version header.
    #[error("settings file has no version header")]
    MissingHeader,

    /// The header line is not `MAJOR MINOR`.
    #[error("invalid version header '{line}'")]
    InvalidHeader {
        /// The offending line
        line: String,
    },

    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File that was accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for single-option operations
pub type OptionResult<T> = Result<T, OptionError>;
