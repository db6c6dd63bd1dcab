mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { force }) => commands::run_init(force),
        Some(Commands::Themes) => commands::run_themes(),
        Some(Commands::Url {
            city,
            country,
            theme,
            distance,
            open,
        }) => commands::run_url(&city, &country, &theme, distance.as_deref(), open),
        None => commands::run_tui(),
    }
}
