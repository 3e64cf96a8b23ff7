use anyhow::Result;
use colored::Colorize;
use keyviz_config::Quality;

/// Print the quality preset table.
pub fn execute() -> Result<()> {
    println!(
        "{}",
        format!(
            "{:<10} {:>10} {:>10} {:>10}",
            "Preset", "Particles", "Blur", "Final"
        )
        .bold()
    );
    for quality in Quality::all() {
        println!("{}", preset_row(quality));
    }
    Ok(())
}

fn preset_row(quality: &Quality) -> String {
    format!(
        "{:<10} {:>10} {:>10} {:>10}",
        quality.name,
        quality.particles_resolution,
        quality.blur_resolution,
        quality.final_resolution
    )
}
