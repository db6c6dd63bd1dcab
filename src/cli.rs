//! CLI argument parsing

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "posterform")]
#[command(author, version, about = "Request a map poster by picking a theme and a location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default .posterform.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
    /// List the themes in the catalog
    Themes,
    /// Print the issue URL for a request without opening the form
    Url {
        /// City to map
        #[arg(long)]
        city: String,
        /// Country of the city
        #[arg(long)]
        country: String,
        /// Theme identifier from the catalog
        #[arg(long)]
        theme: String,
        /// Map radius in meters (default from config)
        #[arg(long)]
        distance: Option<String>,
        /// Open the URL in the default browser
        #[arg(long)]
        open: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_form() {
        let cli = Cli::try_parse_from(["posterform"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_url_args() {
        let cli = Cli::try_parse_from([
            "posterform", "url", "--city", "Tokyo", "--country", "Japan", "--theme", "noir",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Url { city, country, theme, distance, open }) => {
                assert_eq!(city, "Tokyo");
                assert_eq!(country, "Japan");
                assert_eq!(theme, "noir");
                assert!(distance.is_none());
                assert!(!open);
            }
            _ => panic!("expected url command"),
        }
    }

    #[test]
    fn test_url_requires_theme() {
        assert!(Cli::try_parse_from(["posterform", "url", "--city", "A", "--country", "B"]).is_err());
    }
}
