use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use keyviz_cli::{
    cli::{Cli, Commands},
    commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the command line when set
    let env_filter = EnvFilter::builder()
        .with_default_directive(cli.level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Settings file override: {:?}", cli.config);

    match cli.command {
        Commands::Options => commands::options::execute(),
        Commands::Show { overrides } => commands::settings::show(cli.config, &overrides),
        Commands::Write { overrides, output } => {
            commands::settings::write(cli.config, &overrides, output)
        }
        Commands::Presets => commands::presets::execute(),
        Commands::Schema { format } => commands::schema::execute(format),
    }
}
