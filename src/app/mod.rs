//! Application state and logic
//!
//! `App` owns the single `SelectionState` of the form together with the
//! gallery and the text fields, and turns user actions into catalog loads,
//! selections and (on submit) an encoded issue request.

pub mod types;

pub use types::{AppMode, Focus};

use crate::catalog::{HttpClient, PreviewStatus, Theme, ThemeCatalog, UreqHttpClient};
use crate::field::TextField;
use crate::gallery::{CatalogStatus, ThemeGallery};
use crate::request::{IssueRequest, RequestEncoder};
use crate::selection::SelectionState;
use crate::{debug, Config};
use anyhow::Result;

/// Application state
pub struct App<H: HttpClient = UreqHttpClient> {
    pub catalog: ThemeCatalog<H>,
    pub encoder: RequestEncoder,
    pub gallery: ThemeGallery,
    pub selection: SelectionState,
    pub city: TextField,
    pub country: TextField,
    pub distance: TextField,
    pub focus: Focus,
    pub mode: AppMode,
    pub should_quit: bool,
    /// Set when the catalog should be fetched after the next draw
    pub pending_load: bool,
    /// Set when the highlighted preview should be checked once input is idle
    pub pending_check: bool,
    /// Preview the user asked to open
    pub pending_preview: Option<String>,
    /// Encoded request to navigate to once the TUI has exited
    pub outcome: Option<IssueRequest>,
}

impl App<UreqHttpClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ThemeCatalog::from_config(config)?,
            RequestEncoder::from_config(config)?,
            &config.form.default_distance,
        ))
    }
}

impl<H: HttpClient> App<H> {
    pub fn new(catalog: ThemeCatalog<H>, encoder: RequestEncoder, default_distance: &str) -> Self {
        let mut app = Self {
            catalog,
            encoder,
            gallery: ThemeGallery::new(),
            selection: SelectionState::new(default_distance),
            city: TextField::new("City"),
            country: TextField::new("Country"),
            distance: TextField::new("Distance (m)")
                .digits_only()
                .with_value(default_distance),
            focus: Focus::Gallery,
            mode: AppMode::Form,
            should_quit: false,
            pending_load: false,
            pending_check: false,
            pending_preview: None,
            outcome: None,
        };
        app.request_catalog();
        app
    }

    /// Enter the loading state; the fetch itself runs after the next draw
    pub fn request_catalog(&mut self) {
        self.gallery.set_loading();
        self.pending_load = true;
    }

    /// Fetch the catalog (blocking) and show the result
    pub fn load_catalog(&mut self) {
        self.pending_load = false;
        self.selection.clear_theme();

        match self.catalog.load() {
            Ok(themes) => {
                self.gallery.set_themes(themes);
                self.request_preview();
            }
            Err(e) => {
                self.gallery.set_error(e.to_string());
            }
        }
    }

    /// Queue a check of the highlighted preview unless it is already known.
    ///
    /// Never touches the network; see [`App::run_pending_check`].
    pub fn request_preview(&mut self) {
        self.pending_check = self
            .gallery
            .highlighted()
            .is_some_and(|theme| self.gallery.preview(theme.id()).is_none());
    }

    /// Run the queued preview check, if any
    pub fn run_pending_check(&mut self) {
        if !std::mem::take(&mut self.pending_check) {
            return;
        }
        if let Some(theme) = self.gallery.highlighted().cloned() {
            self.check_preview(&theme);
        }
    }

    fn check_preview(&mut self, theme: &Theme) {
        if self.gallery.preview(theme.id()).is_none() {
            let status = self.catalog.check_preview(theme);
            self.gallery.set_preview(theme.id(), status);
        }
    }

    /// Select the gallery entry at `index` (a click on that entry)
    pub fn select_index(&mut self, index: usize) {
        let found = self.selection.select_index(self.gallery.themes(), index);
        self.gallery.mark_selected(found.then_some(index));
    }

    /// Select the first catalog theme with identifier `id`
    pub fn select_theme(&mut self, id: &str) {
        let found = self.selection.select_theme(self.gallery.themes(), id);
        let index = if found {
            self.gallery.themes().iter().position(|t| t.id() == id)
        } else {
            None
        };
        self.gallery.mark_selected(index);
    }

    /// Copy the text fields into the selection state
    pub fn sync_fields(&mut self) {
        self.selection.set_city(self.city.value());
        self.selection.set_country(self.country.value());
        self.selection.set_distance(self.distance.value());
    }

    /// Whether the submit control is enabled. Recomputed on every call.
    pub fn can_submit(&self) -> bool {
        self.selection.is_valid()
    }

    /// Validate and encode the request.
    ///
    /// An incomplete form raises a blocking alert and leaves everything
    /// else untouched; a complete one records the request and quits.
    pub fn submit(&mut self) {
        match self.encoder.encode(&self.selection) {
            Ok(request) => {
                debug::log_request(&request.url);
                self.outcome = Some(request);
                self.should_quit = true;
            }
            Err(e) => {
                debug::log_category("SUBMIT", &e.to_string());
                self.mode = AppMode::Alert(e.to_string());
            }
        }
    }

    /// Queue the preview of entry `index` for opening, if it exists
    pub fn open_preview(&mut self, index: usize) {
        let Some(theme) = self.gallery.themes().get(index).cloned() else {
            return;
        };
        self.check_preview(&theme);
        if let Some(PreviewStatus::Available(url)) = self.gallery.preview(theme.id()) {
            self.pending_preview = Some(url.clone());
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.mode = AppMode::Form;
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self.gallery.status(),
            CatalogStatus::Idle | CatalogStatus::Loading
        )
    }
}
