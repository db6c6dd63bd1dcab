//! Input handling for TUI

use crate::app::{App, AppMode, Focus};
use crate::catalog::HttpClient;
use crate::gallery::GalleryAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Dispatch one key press to the form
pub fn handle_key_event<H: HttpClient>(app: &mut App<H>, key: KeyEvent) {
    // The alert blocks everything until dismissed
    if let AppMode::Alert(_) = app.mode {
        app.dismiss_alert();
        return;
    }

    if handle_keybinding(app, key.modifiers, key.code) {
        return;
    }

    match app.focus {
        Focus::Gallery => handle_gallery_input(app, key.code),
        Focus::City | Focus::Country | Focus::Distance => handle_field_input(app, key),
        Focus::Submit => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.submit(),
            KeyCode::Up => app.focus = app.focus.prev(),
            _ => {}
        },
    }
}

/// Handle global keybindings, returns true if handled
pub fn handle_keybinding<H: HttpClient>(
    app: &mut App<H>,
    modifiers: KeyModifiers,
    code: KeyCode,
) -> bool {
    match (modifiers, code) {
        // Ctrl+Q / Ctrl+C / Esc: Quit without submitting
        (KeyModifiers::CONTROL, KeyCode::Char('q' | 'Q' | 'c' | 'C')) | (_, KeyCode::Esc) => {
            app.should_quit = true;
            true
        }
        // Ctrl+S: Submit from anywhere
        (KeyModifiers::CONTROL, KeyCode::Char('s' | 'S')) => {
            app.submit();
            true
        }
        (_, KeyCode::Tab) => {
            app.focus = app.focus.next();
            true
        }
        (_, KeyCode::BackTab) => {
            app.focus = app.focus.prev();
            true
        }
        _ => false,
    }
}

/// Handle keys while the gallery has focus
pub fn handle_gallery_input<H: HttpClient>(app: &mut App<H>, code: KeyCode) {
    match app.gallery.handle_key(code) {
        Some(GalleryAction::Highlighted(_)) => app.request_preview(),
        Some(GalleryAction::Select(index)) => app.select_index(index),
        Some(GalleryAction::OpenPreview(index)) => app.open_preview(index),
        Some(GalleryAction::Reload) => app.request_catalog(),
        None => {}
    }
}

/// Handle keys while one of the text fields has focus
pub fn handle_field_input<H: HttpClient>(app: &mut App<H>, key: KeyEvent) {
    let code = key.code;
    // Unbound Ctrl/Alt chords must not type their letter
    if matches!(code, KeyCode::Char(_))
        && key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return;
    }

    match code {
        KeyCode::Enter | KeyCode::Down => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::Up => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    let field = match app.focus {
        Focus::City => &mut app.city,
        Focus::Country => &mut app.country,
        Focus::Distance => &mut app.distance,
        Focus::Gallery | Focus::Submit => return,
    };

    if field.handle_key(code) {
        app.sync_fields();
    }
}
