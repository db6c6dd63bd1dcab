//! Form selection state and validation
//!
//! One `SelectionState` lives for as long as the form is open. It is owned by
//! the UI controller and passed explicitly to the validator and the request
//! encoder.

use crate::catalog::Theme;
use crate::debug;

/// The user's current choice: at most one theme plus the text fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_theme: Option<Theme>,
    city: String,
    country: String,
    distance: String,
}

impl SelectionState {
    /// Empty state with the distance field pre-filled
    pub fn new(default_distance: &str) -> Self {
        Self {
            distance: default_distance.to_string(),
            ..Self::default()
        }
    }

    /// Select the first theme in `catalog` whose identifier equals `id`.
    ///
    /// Any previous selection is replaced. When nothing matches, the
    /// selection is cleared and the miss is written to the debug log.
    /// Returns whether a theme was found.
    pub fn select_theme(&mut self, catalog: &[Theme], id: &str) -> bool {
        self.selected_theme = catalog.iter().find(|t| t.id() == id).cloned();
        if self.selected_theme.is_none() {
            debug::log_category("SELECTION", &format!("no theme with id '{id}' in catalog"));
        }
        self.selected_theme.is_some()
    }

    /// Select the catalog entry at `index`, as a gallery click does.
    ///
    /// Unlike `select_theme`, this picks exactly `catalog[index]` even when
    /// identifiers are duplicated.
    pub fn select_index(&mut self, catalog: &[Theme], index: usize) -> bool {
        self.selected_theme = catalog.get(index).cloned();
        if self.selected_theme.is_none() {
            debug::log_category(
                "SELECTION",
                &format!("index {index} out of range ({} themes)", catalog.len()),
            );
        }
        self.selected_theme.is_some()
    }

    /// Drop the selected theme
    pub fn clear_theme(&mut self) {
        self.selected_theme = None;
    }

    pub fn selected_theme(&self) -> Option<&Theme> {
        self.selected_theme.as_ref()
    }

    pub fn set_city(&mut self, city: &str) {
        self.city = city.to_string();
    }

    pub fn set_country(&mut self, country: &str) {
        self.country = country.to_string();
    }

    pub fn set_distance(&mut self, distance: &str) {
        self.distance = distance.to_string();
    }

    /// City, trimmed
    pub fn city(&self) -> &str {
        self.city.trim()
    }

    /// Country, trimmed
    pub fn country(&self) -> &str {
        self.country.trim()
    }

    /// Distance in meters as entered, trimmed.
    /// The range is checked by the poster pipeline, not here.
    pub fn distance(&self) -> &str {
        self.distance.trim()
    }

    /// Whether the form may be submitted
    pub fn is_valid(&self) -> bool {
        !self.city().is_empty() && !self.country().is_empty() && self.selected_theme.is_some()
    }

    /// Human-readable names of whatever is still missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.city().is_empty() {
            missing.push("city");
        }
        if self.country().is_empty() {
            missing.push("country");
        }
        if self.selected_theme.is_none() {
            missing.push("theme");
        }
        missing
    }
}
