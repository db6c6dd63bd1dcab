//! posterform - map poster request form
//!
//! Browse the published theme catalog, fill in a location and submit a
//! poster request as a pre-filled GitHub issue.
//!
//! # Modules
//!
//! - [`catalog`] - Theme index loading and preview probing
//! - [`selection`] - Form state and its validity rule
//! - [`request`] - Issue title, body and URL encoding
//! - [`gallery`] - Theme gallery widget
//! - [`field`] - Text input widget
//! - [`app`] / [`tui`] - Form controller, rendering and key handling

pub mod app;
pub mod catalog;
pub mod config;
pub mod debug;
pub mod field;
pub mod gallery;
pub mod palette;
pub mod request;
pub mod selection;
pub mod tui;

// Re-export commonly used types
pub use app::{App, AppMode, Focus};
pub use catalog::{
    CatalogError, CatalogSource, HttpClient, PreviewStatus, Theme, ThemeCatalog, UreqHttpClient,
};
pub use config::{Config, CONFIG_FILE_NAME};
pub use gallery::{CatalogStatus, ThemeGallery};
pub use palette::{palette, set_palette_from_str, PaletteId};
pub use request::{IssueRequest, RequestBody, RequestEncoder, RequestError};
pub use selection::SelectionState;
