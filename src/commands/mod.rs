//! Command implementations

pub mod init;
pub mod request;
pub mod themes;
pub mod tui;

pub use init::run_init;
pub use request::run_url;
pub use themes::run_themes;
pub use tui::run_tui;
