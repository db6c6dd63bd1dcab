//! Color palettes for the posterform UI
//!
//! Poster themes come from the catalog; this module only decides how the
//! terminal form itself is colored. Palettes: Cyberpunk (default), Nord, Minimal.

use ratatui::style::{Color, Modifier, Style};
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::RwLock;

// ==================== PaletteId Enum ====================

/// Palette identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PaletteId {
    #[default]
    Cyberpunk,
    Nord,
    Minimal,
}

impl PaletteId {
    /// Get the ID string for this palette (as written in the config file)
    pub fn id(&self) -> &'static str {
        match self {
            PaletteId::Cyberpunk => "cyberpunk",
            PaletteId::Nord => "nord",
            PaletteId::Minimal => "minimal",
        }
    }
}

impl FromStr for PaletteId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cyberpunk" => Ok(PaletteId::Cyberpunk),
            "nord" => Ok(PaletteId::Nord),
            "minimal" => Ok(PaletteId::Minimal),
            _ => Err(()),
        }
    }
}

impl Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ==================== Palette Struct ====================

/// Complete color palette definition
#[derive(Clone, Debug)]
pub struct Palette {
    pub id: PaletteId,

    /// Primary accent (borders, key hints)
    pub accent: Color,
    /// Secondary accent (focused borders, selection marker)
    pub accent_alt: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub bg_dark: Color,
    pub bg_highlight: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    /// Unfocused border color
    pub border_muted: Color,
}

impl Palette {
    /// Style for unfocused panel borders
    pub fn style_border(&self) -> Style {
        Style::default().fg(self.border_muted)
    }

    /// Style for the focused panel border
    pub fn style_border_focus(&self) -> Style {
        Style::default()
            .fg(self.accent_alt)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the header badge
    pub fn style_header(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0, 0, 0))
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn style_text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn style_text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Style for key bindings in help lines
    pub fn style_key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the highlighted gallery row
    pub fn style_highlight(&self) -> Style {
        Style::default()
            .bg(self.bg_highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the marker of the selected theme
    pub fn style_marker(&self) -> Style {
        Style::default()
            .fg(self.accent_alt)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the text cursor in input fields
    pub fn style_cursor(&self) -> Style {
        Style::default().fg(Color::Rgb(0, 0, 0)).bg(self.accent)
    }

    pub fn style_input(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn style_loading(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn style_error(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for an enabled submit control
    pub fn style_enabled(&self) -> Style {
        Style::default()
            .fg(Color::Rgb(0, 0, 0))
            .bg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a disabled submit control
    pub fn style_disabled(&self) -> Style {
        Style::default()
            .fg(self.text_muted)
            .add_modifier(Modifier::DIM)
    }

    /// Background of modal popups
    pub fn style_dialog_bg(&self) -> Style {
        Style::default().bg(self.bg_dark)
    }
}

// ==================== Palette Definitions ====================

/// Cyberpunk palette - neon colors with dark background
pub const CYBERPUNK: Palette = Palette {
    id: PaletteId::Cyberpunk,
    accent: Color::Rgb(0, 255, 255),
    accent_alt: Color::Rgb(255, 0, 128),
    success: Color::Rgb(57, 255, 20),
    warning: Color::Rgb(255, 255, 0),
    error: Color::Rgb(255, 50, 80),
    bg_dark: Color::Rgb(13, 13, 26),
    bg_highlight: Color::Rgb(50, 50, 80),
    text_primary: Color::Rgb(230, 230, 240),
    text_secondary: Color::Rgb(140, 140, 160),
    text_muted: Color::Rgb(90, 90, 110),
    border_muted: Color::Rgb(60, 60, 90),
};

/// Nord palette - arctic, north-bluish colors
pub const NORD: Palette = Palette {
    id: PaletteId::Nord,
    accent: Color::Rgb(136, 192, 208),
    accent_alt: Color::Rgb(180, 142, 173),
    success: Color::Rgb(163, 190, 140),
    warning: Color::Rgb(235, 203, 139),
    error: Color::Rgb(191, 97, 106),
    bg_dark: Color::Rgb(46, 52, 64),
    bg_highlight: Color::Rgb(76, 86, 106),
    text_primary: Color::Rgb(236, 239, 244),
    text_secondary: Color::Rgb(216, 222, 233),
    text_muted: Color::Rgb(129, 161, 193),
    border_muted: Color::Rgb(67, 76, 94),
};

/// Minimal palette - subdued, professional colors
pub const MINIMAL: Palette = Palette {
    id: PaletteId::Minimal,
    accent: Color::Rgb(74, 158, 255),
    accent_alt: Color::Rgb(200, 120, 150),
    success: Color::Rgb(76, 175, 80),
    warning: Color::Rgb(255, 152, 0),
    error: Color::Rgb(244, 67, 54),
    bg_dark: Color::Rgb(26, 26, 26),
    bg_highlight: Color::Rgb(55, 55, 55),
    text_primary: Color::Rgb(224, 224, 224),
    text_secondary: Color::Rgb(158, 158, 158),
    text_muted: Color::Rgb(97, 97, 97),
    border_muted: Color::Rgb(66, 66, 66),
};

// ==================== Global Palette Management ====================

static CURRENT_PALETTE_ID: RwLock<PaletteId> = RwLock::new(PaletteId::Cyberpunk);

/// Get the Palette for a given PaletteId
pub fn get_palette(id: PaletteId) -> &'static Palette {
    match id {
        PaletteId::Cyberpunk => &CYBERPUNK,
        PaletteId::Nord => &NORD,
        PaletteId::Minimal => &MINIMAL,
    }
}

/// Get the current palette
pub fn palette() -> &'static Palette {
    let id = CURRENT_PALETTE_ID.read().unwrap_or_else(|e| e.into_inner());
    get_palette(*id)
}

/// Set the global palette
pub fn set_palette(id: PaletteId) {
    let mut guard = CURRENT_PALETTE_ID
        .write()
        .unwrap_or_else(|e| e.into_inner());
    *guard = id;
}

/// Set the global palette from a config name, falling back to Cyberpunk.
///
/// Returns false when the name was not recognized.
pub fn set_palette_from_str(name: &str) -> bool {
    match name.parse() {
        Ok(id) => {
            set_palette(id);
            true
        }
        Err(()) => {
            set_palette(PaletteId::Cyberpunk);
            false
        }
    }
}
