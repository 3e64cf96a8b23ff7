pub mod options;
pub mod presets;
pub mod schema;
pub mod settings;
