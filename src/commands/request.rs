//! Non-interactive request encoding

use anyhow::{bail, Result};
use posterform::{Config, RequestEncoder, SelectionState, ThemeCatalog};

/// Encode a request from arguments and print its URL
pub fn run_url(
    city: &str,
    country: &str,
    theme: &str,
    distance: Option<&str>,
    open: bool,
) -> Result<()> {
    let config = Config::load()?;
    let catalog = ThemeCatalog::from_config(&config)?;
    let encoder = RequestEncoder::from_config(&config)?;

    let themes = catalog.load()?;

    let mut state = SelectionState::new(distance.unwrap_or(&config.form.default_distance));
    state.set_city(city);
    state.set_country(country);
    if !state.select_theme(&themes, theme) {
        bail!("Unknown theme '{theme}'. Run `posterform themes` to list the catalog.");
    }

    let request = encoder.encode(&state)?;
    println!("{}", request.url);

    if open {
        webbrowser::open(&request.url)?;
    }
    Ok(())
}
