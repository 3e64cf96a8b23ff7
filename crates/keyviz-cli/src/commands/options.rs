use anyhow::Result;
use colored::Colorize;

/// Print the generated option documentation.
pub fn execute() -> Result<()> {
    let help = keyviz_config::describe();
    println!("{}", "Options:".bold());
    println!("{}", help.defaults);
    println!();
    println!("{}", "Per-set options (<set> is a set index):".bold());
    println!("{}", help.sets);
    Ok(())
}
