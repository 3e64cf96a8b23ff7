//! Human-readable option documentation generated from the schema.

use crate::schema::{OptionMeta, OptionSchema};
use crate::value::{Category, OptionType};

/// Spaces between the longest flag and its description.
const PADDING: usize = 2;

/// Rendered option documentation, one line per option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    /// Global options.
    pub defaults: String,
    /// Per-set options, written as `--<name>.<set>`.
    pub sets: String,
    /// Column at which descriptions start, for aligning other flags.
    pub width: usize,
}

/// Document the built-in schema.
pub fn describe() -> HelpText {
    describe_schema(OptionSchema::builtin())
}

pub fn describe_schema(schema: &OptionSchema) -> HelpText {
    let options = schema.all();
    let width = options
        .iter()
        .map(|meta| flag(meta).len())
        .max()
        .unwrap_or(0)
        + PADDING;

    let section = |category: Category| {
        options
            .iter()
            .filter(|meta| meta.category == category)
            .map(|meta| line(meta, width))
            .collect::<Vec<_>>()
            .join("\n")
    };

    HelpText {
        defaults: section(Category::Default),
        sets: section(Category::PerSet),
        width,
    }
}

fn flag(meta: &OptionMeta) -> String {
    match meta.category {
        Category::Default => format!("--{}", meta.name),
        Category::PerSet => format!("--{}.<set>", meta.name),
    }
}

fn line(meta: &OptionMeta, width: usize) -> String {
    format!(
        "{:<width$}{} ({})",
        flag(meta),
        meta.description,
        type_info(meta),
        width = width
    )
}

fn type_info(meta: &OptionMeta) -> String {
    let [min, max] = meta.range;
    match meta.kind {
        OptionType::Bool => "0 or 1".to_string(),
        OptionType::Int => {
            let (min, max) = meta.int_range();
            format!("integer in [{min}, {max}]")
        }
        OptionType::Float => format!("number in [{min}, {max}]"),
        OptionType::Color => "R G B in [0, 1]".to_string(),
        OptionType::Path => "path, repeatable".to_string(),
        OptionType::Key => {
            let (min, max) = meta.int_range();
            format!("key in [{min}, {max}]")
        }
        OptionType::Other => format!("one of {}", meta.values.join(", ")),
    }
}
