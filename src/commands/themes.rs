//! Themes command implementation

use anyhow::Result;
use posterform::{Config, Theme, ThemeCatalog};

/// List the catalog as `id  name  description` rows
pub fn run_themes() -> Result<()> {
    let config = Config::load()?;
    let catalog = ThemeCatalog::from_config(&config)?;

    let themes = catalog.load()?;
    if themes.is_empty() {
        println!("No themes available yet");
        return Ok(());
    }

    print!("{}", format_table(&themes));
    Ok(())
}

fn format_table(themes: &[Theme]) -> String {
    let id_width = themes.iter().map(|t| t.id().chars().count()).max().unwrap_or(0);
    let name_width = themes
        .iter()
        .map(|t| t.display_name().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for theme in themes {
        let row = format!(
            "{:<id_width$}  {:<name_width$}  {}",
            theme.id(),
            theme.display_name(),
            theme.description()
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
