//! # keyviz configuration registry
//!
//! Self-describing settings for the keyviz MIDI visualizer. Every option is
//! declared once in the [`OptionSchema`] and from there can be read and written
//! by name, stored in a versioned text file, overridden from the command line
//! and documented in generated help text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keyviz_config::{codec, merge};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut report = codec::load_file("settings.conf")?;
//!     for diagnostic in &report.diagnostics {
//!         eprintln!("warning: {diagnostic}");
//!     }
//!     merge::apply(&mut report.settings, &[("scale", "2.0")]);
//!     println!("{}", codec::save(&report.settings));
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod binding;
pub mod codec;
pub mod error;
pub mod help;
pub mod legacy;
pub mod merge;
pub mod quality;
pub mod schema;
pub mod settings;
pub mod store;
pub mod value;

pub use binding::{BindingRegistry, Partition};
pub use codec::{load, load_file, save, save_file, LoadReport};
pub use error::{CodecError, Diagnostic, OptionError, OptionResult, SchemaError};
pub use help::{describe, HelpText};
pub use legacy::{FormatVersion, CURRENT_VERSION};
pub use quality::{Quality, QualityLevel};
pub use schema::{OptionMeta, OptionSchema};
pub use settings::Settings;
pub use store::{ImageSource, ResourceHandle, SetColorKind, ValueStore};
pub use value::{Category, Color, OptionType, Value};
