use anyhow::{Context, Result};
use keyviz_config::OptionSchema;

use crate::cli::SchemaFormat;

/// Export option metadata for UI collaborators.
pub fn execute(format: SchemaFormat) -> Result<()> {
    println!("{}", render(OptionSchema::builtin(), format)?);
    Ok(())
}

fn render(schema: &OptionSchema, format: SchemaFormat) -> Result<String> {
    match format {
        SchemaFormat::Json => {
            serde_json::to_string_pretty(&schema.all()).context("Failed to serialize option schema")
        }
        SchemaFormat::Text => Ok(schema
            .all()
            .iter()
            .map(|meta| format!("{}\t{}\t{}", meta.name, meta.kind.label(), meta.description))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
