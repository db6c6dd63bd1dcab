//! Theme gallery for posterform
//!
//! Renders the loaded catalog as a navigable list and tracks which entry is
//! highlighted and which one is marked as selected.

use crate::catalog::{PreviewStatus, Theme};
use crate::palette::palette;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::collections::HashMap;

/// Shown instead of entries when the catalog is empty
pub const EMPTY_PLACEHOLDER: &str = "No themes available yet";

/// Shown for a theme whose preview image is missing
pub const PREVIEW_PLACEHOLDER: &str = "Preview coming soon";

/// Load state of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch requested, waiting for the result
    Loading,
    /// Themes are available (possibly zero of them)
    Loaded,
    /// The index could not be loaded
    Errored(String),
}

/// Result of gallery interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryAction {
    /// The highlighted entry moved
    Highlighted(usize),
    /// User chose the entry at this index
    Select(usize),
    /// User asked to open the preview of this entry
    OpenPreview(usize),
    /// User asked to load the catalog again
    Reload,
}

/// One rendered gallery row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub selected: bool,
}

/// Theme gallery UI component
pub struct ThemeGallery {
    themes: Vec<Theme>,
    status: CatalogStatus,
    highlighted: usize,
    /// Index of the entry marked as selected; at most one
    selected: Option<usize>,
    /// Preview check results by theme id
    previews: HashMap<String, PreviewStatus>,
    list_state: ListState,
}

impl ThemeGallery {
    pub fn new() -> Self {
        Self {
            themes: Vec::new(),
            status: CatalogStatus::Idle,
            highlighted: 0,
            selected: None,
            previews: HashMap::new(),
            list_state: ListState::default(),
        }
    }

    /// Mark the catalog as loading
    pub fn set_loading(&mut self) {
        self.status = CatalogStatus::Loading;
    }

    /// Show a loaded catalog, clearing any previous selection marker
    pub fn set_themes(&mut self, themes: Vec<Theme>) {
        self.themes = themes;
        self.status = CatalogStatus::Loaded;
        self.highlighted = 0;
        self.selected = None;
        self.previews.clear();
        self.list_state
            .select(if self.themes.is_empty() { None } else { Some(0) });
    }

    /// Show a load failure
    pub fn set_error(&mut self, reason: String) {
        self.themes.clear();
        self.status = CatalogStatus::Errored(reason);
        self.selected = None;
        self.list_state.select(None);
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn highlighted(&self) -> Option<&Theme> {
        self.themes.get(self.highlighted)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Move the selection marker to `index`, or clear it
    pub fn mark_selected(&mut self, index: Option<usize>) {
        self.selected = index.filter(|i| *i < self.themes.len());
    }

    pub fn preview(&self, theme_id: &str) -> Option<&PreviewStatus> {
        self.previews.get(theme_id)
    }

    pub fn set_preview(&mut self, theme_id: &str, status: PreviewStatus) {
        self.previews.insert(theme_id.to_string(), status);
    }

    /// Rows as they are rendered, in catalog order
    pub fn entries(&self) -> Vec<GalleryEntry<'_>> {
        self.themes
            .iter()
            .enumerate()
            .map(|(i, theme)| GalleryEntry {
                id: theme.id(),
                name: theme.display_name(),
                selected: self.selected == Some(i),
            })
            .collect()
    }

    /// Handle key input while the gallery has focus
    pub fn handle_key(&mut self, key: KeyCode) -> Option<GalleryAction> {
        if let CatalogStatus::Errored(_) = self.status {
            return match key {
                KeyCode::Char('r') => Some(GalleryAction::Reload),
                _ => None,
            };
        }

        if self.themes.is_empty() {
            return None;
        }

        let last = self.themes.len() - 1;
        let target = match key {
            KeyCode::Up | KeyCode::Char('k') => self.highlighted.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => (self.highlighted + 1).min(last),
            KeyCode::Home => 0,
            KeyCode::End => last,
            KeyCode::PageUp => self.highlighted.saturating_sub(10),
            KeyCode::PageDown => (self.highlighted + 10).min(last),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return Some(GalleryAction::Select(self.highlighted));
            }
            KeyCode::Char('o') => return Some(GalleryAction::OpenPreview(self.highlighted)),
            _ => return None,
        };

        if target == self.highlighted {
            return None;
        }
        self.highlighted = target;
        self.list_state.select(Some(target));
        Some(GalleryAction::Highlighted(target))
    }

    /// Render the gallery list
    pub fn render(&mut self, f: &mut Frame, area: Rect, focused: bool) {
        let p = palette();

        let block = Block::default()
            .title(format!(" Themes ({}) ", self.themes.len()))
            .borders(Borders::ALL)
            .border_style(if focused {
                p.style_border_focus()
            } else {
                p.style_border()
            });

        let inner_area = block.inner(area);
        f.render_widget(block, area);

        match self.status {
            CatalogStatus::Idle | CatalogStatus::Loading => {
                let loading = Paragraph::new("Loading themes...").style(p.style_loading());
                f.render_widget(loading, inner_area);
                return;
            }
            CatalogStatus::Errored(ref reason) => {
                let error = Paragraph::new(vec![
                    Line::from(Span::styled("Could not load themes.", p.style_error())),
                    Line::from(Span::styled(reason.as_str(), p.style_text_secondary())),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("[", p.style_text_muted()),
                        Span::styled("r", p.style_key()),
                        Span::styled("] Reload", p.style_text_muted()),
                    ]),
                ])
                .wrap(Wrap { trim: true });
                f.render_widget(error, inner_area);
                return;
            }
            CatalogStatus::Loaded => {}
        }

        if self.themes.is_empty() {
            let empty = Paragraph::new(EMPTY_PLACEHOLDER).style(p.style_text_muted());
            f.render_widget(empty, inner_area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries()
            .into_iter()
            .map(|entry| {
                let marker = if entry.selected { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, p.style_marker()),
                    Span::styled(entry.name.to_string(), p.style_text()),
                    Span::styled(format!("  [{}]", entry.id), p.style_text_muted()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(p.style_highlight())
            .highlight_symbol("> ");

        f.render_stateful_widget(list, inner_area, &mut self.list_state);
    }
}

impl Default for ThemeGallery {
    fn default() -> Self {
        Self::new()
    }
}

/// `percent` of `length`, computed in u32
fn scale(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(length)
}

/// Calculate centered popup area
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = scale(area.width, percent_x);
    let popup_height = scale(area.height, percent_y);

    let x = (area.width - popup_width) / 2;
    let y = (area.height - popup_height) / 2;

    Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width,
        height: popup_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_themes() -> Vec<Theme> {
        vec![
            Theme::new("noir", "Noir", Some("Pure black and white")),
            Theme::new("blueprint", "Blueprint", Some("Architectural")),
            Theme::new("warm_beige", "Warm Beige", None),
        ]
    }

    fn render_text(gallery: &mut ThemeGallery, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| gallery.render(f, f.area(), true)).unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_new_gallery() {
        let gallery = ThemeGallery::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.status(), &CatalogStatus::Idle);
        assert!(gallery.selected_index().is_none());
    }

    #[test]
    fn test_set_themes() {
        let mut gallery = ThemeGallery::new();
        gallery.set_loading();
        gallery.set_themes(create_test_themes());

        assert_eq!(gallery.status(), &CatalogStatus::Loaded);
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.highlighted().unwrap().id(), "noir");
    }

    #[test]
    fn test_navigation() {
        let mut gallery = ThemeGallery::new();
        gallery.set_themes(create_test_themes());

        assert_eq!(gallery.handle_key(KeyCode::Down), Some(GalleryAction::Highlighted(1)));
        assert_eq!(gallery.handle_key(KeyCode::Char('j')), Some(GalleryAction::Highlighted(2)));
        // bottom: stays
        assert_eq!(gallery.handle_key(KeyCode::Down), None);
        assert_eq!(gallery.highlighted().unwrap().id(), "warm_beige");

        gallery.handle_key(KeyCode::Char('k'));
        assert_eq!(gallery.highlighted().unwrap().id(), "blueprint");

        gallery.handle_key(KeyCode::Home);
        assert_eq!(gallery.highlighted().unwrap().id(), "noir");
        gallery.handle_key(KeyCode::End);
        assert_eq!(gallery.highlighted().unwrap().id(), "warm_beige");
    }

    #[test]
    fn test_select_and_preview_actions() {
        let mut gallery = ThemeGallery::new();
        gallery.set_themes(create_test_themes());

        gallery.handle_key(KeyCode::Down);
        assert_eq!(gallery.handle_key(KeyCode::Enter), Some(GalleryAction::Select(1)));
        assert_eq!(gallery.handle_key(KeyCode::Char(' ')), Some(GalleryAction::Select(1)));
        assert_eq!(gallery.handle_key(KeyCode::Char('o')), Some(GalleryAction::OpenPreview(1)));
    }

    #[test]
    fn test_single_selection_marker() {
        let mut gallery = ThemeGallery::new();
        gallery.set_themes(create_test_themes());

        gallery.mark_selected(Some(0));
        gallery.mark_selected(Some(2));

        let marked: Vec<&str> = gallery
            .entries()
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.id)
            .collect();
        assert_eq!(marked, vec!["warm_beige"]);

        gallery.mark_selected(Some(9));
        assert!(gallery.selected_index().is_none());
    }

    #[test]
    fn test_empty_catalog_renders_placeholder() {
        let mut gallery = ThemeGallery::new();
        gallery.set_themes(Vec::new());

        assert_eq!(gallery.handle_key(KeyCode::Enter), None);
        assert!(gallery.highlighted().is_none());

        let lines = render_text(&mut gallery, 40, 6);
        let placeholder_rows = lines.iter().filter(|l| l.contains(EMPTY_PLACEHOLDER)).count();
        assert_eq!(placeholder_rows, 1);
        assert!(!lines.iter().any(|l| l.contains('[') && l.contains(']')));
    }

    #[test]
    fn test_loading_and_error_render() {
        let mut gallery = ThemeGallery::new();
        gallery.set_loading();
        let lines = render_text(&mut gallery, 40, 6);
        assert!(lines.iter().any(|l| l.contains("Loading themes...")));

        gallery.set_error("HTTP 404".to_string());
        let lines = render_text(&mut gallery, 40, 8);
        assert!(lines.iter().any(|l| l.contains("Could not load themes.")));
        assert!(lines.iter().any(|l| l.contains("HTTP 404")));
    }

    #[test]
    fn test_error_state_only_reloads() {
        let mut gallery = ThemeGallery::new();
        gallery.set_error("HTTP 500".to_string());

        assert_eq!(gallery.handle_key(KeyCode::Enter), None);
        assert_eq!(gallery.handle_key(KeyCode::Char('r')), Some(GalleryAction::Reload));
    }

    #[test]
    fn test_preview_cache() {
        let mut gallery = ThemeGallery::new();
        gallery.set_themes(create_test_themes());
        gallery.set_preview("noir", PreviewStatus::ComingSoon);

        assert_eq!(gallery.preview("noir"), Some(&PreviewStatus::ComingSoon));
        assert!(gallery.preview("blueprint").is_none());

        gallery.set_themes(create_test_themes());
        assert!(gallery.preview("noir").is_none());
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 100,
            height: 50,
        };

        let popup = centered_rect(80, 60, area);

        assert_eq!(popup.width, 80);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 10);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn test_centered_rect_wide_terminal() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 4000,
            height: 1200,
        };

        let popup = centered_rect(60, 30, area);

        assert_eq!(popup.width, 2400);
        assert_eq!(popup.height, 360);
        assert_eq!(popup.x, 800);
        assert_eq!(popup.y, 420);
    }

    proptest! {
        #[test]
        fn prop_one_row_per_theme(ids in prop::collection::vec("[a-z]{3,10}", 1..15)) {
            let themes: Vec<Theme> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| Theme::new(&format!("{id}{i}"), "Name", None))
                .collect();
            let mut gallery = ThemeGallery::new();
            gallery.set_themes(themes.clone());

            let lines = render_text(&mut gallery, 60, themes.len() as u16 + 2);
            for theme in &themes {
                let tag = format!("[{}]", theme.id());
                prop_assert_eq!(lines.iter().filter(|l| l.contains(&tag)).count(), 1);
            }
            let tagged = lines.iter().filter(|l| l.contains("  [")).count();
            prop_assert_eq!(tagged, themes.len());
        }
    }
}
