//! Single-line text input used for the city, country and distance fields

use crate::palette::palette;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// A labelled single-line text input with a cursor.
///
/// The cursor is counted in characters so multi-byte input
/// (`São Paulo`, `Zürich`) edits correctly.
#[derive(Debug, Clone)]
pub struct TextField {
    label: String,
    input: String,
    cursor_position: usize,
    digits_only: bool,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            input: String::new(),
            cursor_position: 0,
            digits_only: false,
        }
    }

    /// Accept only ASCII digits
    pub fn digits_only(mut self) -> Self {
        self.digits_only = true;
        self
    }

    /// Pre-fill the field, cursor at the end
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn set_value(&mut self, value: &str) {
        let filtered: String = value.chars().filter(|c| self.accepts(*c)).collect();
        self.input = filtered;
        self.cursor_position = self.char_count();
    }

    fn accepts(&self, c: char) -> bool {
        if self.digits_only {
            c.is_ascii_digit()
        } else {
            !c.is_control() && c != '\u{2028}' && c != '\u{2029}'
        }
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Byte offset of the character at `char_index`
    fn byte_offset(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Handle key input.
    ///
    /// Returns true when the value changed.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                if !self.accepts(c) {
                    return false;
                }
                let at = self.byte_offset(self.cursor_position);
                self.input.insert(at, c);
                self.cursor_position += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.cursor_position -= 1;
                    let at = self.byte_offset(self.cursor_position);
                    self.input.remove(at);
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.cursor_position < self.char_count() {
                    let at = self.byte_offset(self.cursor_position);
                    self.input.remove(at);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor_position < self.char_count() {
                    self.cursor_position += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
                false
            }
            _ => false,
        }
    }

    /// Render the field; the cursor is only drawn while focused
    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let p = palette();

        let line = if focused {
            let at = self.byte_offset(self.cursor_position);
            let (before, after) = self.input.split_at(at);
            let mut rest = after.chars();
            let cursor_char = rest.next().unwrap_or(' ');
            Line::from(vec![
                Span::raw(before),
                Span::styled(cursor_char.to_string(), p.style_cursor()),
                Span::raw(rest.as_str()),
            ])
        } else {
            Line::from(Span::raw(self.input.as_str()))
        };

        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(if focused {
                p.style_border_focus()
            } else {
                p.style_border()
            });

        let field = Paragraph::new(line).block(block).style(p.style_input());
        f.render_widget(field, area);
    }
}
