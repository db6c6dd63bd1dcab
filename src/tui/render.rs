//! TUI rendering functions

use crate::app::{App, AppMode, Focus};
use crate::catalog::{HttpClient, PreviewStatus};
use crate::gallery::{centered_rect, PREVIEW_PLACEHOLDER};
use crate::palette::palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Main UI rendering function
pub fn ui<H: HttpClient>(f: &mut Frame, app: &mut App<H>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Footer with key hints
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_footer(f, app, chunks[2]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let gallery_focused = app.focus == Focus::Gallery;
    app.gallery.render(f, columns[0], gallery_focused);
    render_form(f, app, columns[1]);

    if let AppMode::Alert(ref message) = app.mode {
        let area = f.area();
        render_alert(f, message, area);
    }
}

/// Render the header with the catalog location
pub fn render_header<H: HttpClient>(f: &mut Frame, app: &App<H>, area: Rect) {
    let p = palette();
    let spans = vec![
        Span::styled(" posterform ", p.style_header()),
        Span::styled(
            concat!(" v", env!("CARGO_PKG_VERSION"), " "),
            p.style_text_muted(),
        ),
        Span::styled(format!(" {}", app.catalog.source()), p.style_text_secondary()),
    ];
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render key hints for the focused element
pub fn render_footer<H: HttpClient>(f: &mut Frame, app: &App<H>, area: Rect) {
    let p = palette();

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Gallery => &[
            ("↑↓", "move"),
            ("Enter", "select"),
            ("o", "preview"),
            ("r", "reload"),
        ],
        Focus::City | Focus::Country | Focus::Distance => &[("←→", "cursor"), ("Enter", "next")],
        Focus::Submit => &[("Enter", "submit")],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (key, action) in hints
        .iter()
        .chain([("Tab", "next field"), ("^S", "submit"), ("Esc", "quit")].iter())
    {
        spans.push(Span::styled(format!("[{key}]"), p.style_key()));
        spans.push(Span::styled(format!(" {action}  "), p.style_text_muted()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form<H: HttpClient>(f: &mut Frame, app: &App<H>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Highlighted theme details
            Constraint::Length(3), // City
            Constraint::Length(3), // Country
            Constraint::Length(3), // Distance
            Constraint::Length(3), // Submit
            Constraint::Min(0),    // Summary
        ])
        .split(area);

    render_details(f, app, rows[0]);
    app.city.render(f, rows[1], app.focus == Focus::City);
    app.country.render(f, rows[2], app.focus == Focus::Country);
    app.distance.render(f, rows[3], app.focus == Focus::Distance);
    render_submit(f, app, rows[4]);
    render_summary(f, app, rows[5]);
}

/// Details of the highlighted gallery entry
fn render_details<H: HttpClient>(f: &mut Frame, app: &App<H>, area: Rect) {
    let p = palette();
    let block = Block::default()
        .title(" Theme ")
        .borders(Borders::ALL)
        .border_style(p.style_border());

    let lines = match app.gallery.highlighted() {
        Some(theme) => {
            let description = if theme.description().is_empty() {
                Span::styled("No description", p.style_text_muted())
            } else {
                Span::styled(theme.description(), p.style_text_secondary())
            };
            let preview = match app.gallery.preview(theme.id()) {
                Some(PreviewStatus::Available(url)) => {
                    Span::styled(format!("Preview: {url}"), p.style_text_secondary())
                }
                Some(PreviewStatus::ComingSoon) => {
                    Span::styled(PREVIEW_PLACEHOLDER, p.style_text_muted())
                }
                None => Span::styled("Checking preview...", p.style_loading()),
            };
            vec![
                Line::from(Span::styled(
                    theme.display_name(),
                    p.style_text().add_modifier(Modifier::BOLD),
                )),
                Line::from(description),
                Line::from(""),
                Line::from(preview),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Pick a theme from the gallery",
            p.style_text_muted(),
        ))],
    };

    let details = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(details, area);
}

fn render_submit<H: HttpClient>(f: &mut Frame, app: &App<H>, area: Rect) {
    let p = palette();
    let focused = app.focus == Focus::Submit;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            p.style_border_focus()
        } else {
            p.style_border()
        });

    let line = if app.can_submit() {
        Line::from(Span::styled("Submit request", p.style_enabled()))
    } else {
        let missing = app.selection.missing_fields().join(", ");
        Line::from(vec![
            Span::styled("Submit request", p.style_disabled()),
            Span::styled(format!("  missing: {missing}"), p.style_text_muted()),
        ])
    };

    let button = Paragraph::new(line)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(button, area);
}

fn render_summary<H: HttpClient>(f: &mut Frame, app: &App<H>, area: Rect) {
    let p = palette();

    let selected = match app.selection.selected_theme() {
        Some(theme) => Span::styled(
            format!("{} ({})", theme.display_name(), theme.id()),
            p.style_marker(),
        ),
        None => Span::styled("none", p.style_text_muted()),
    };

    let lines = vec![Line::from(vec![
        Span::styled(" Selected theme: ", p.style_text_secondary()),
        selected,
    ])];
    f.render_widget(Paragraph::new(lines), area);
}

/// Blocking notice drawn over the form
pub fn render_alert(f: &mut Frame, message: &str, area: Rect) {
    let p = palette();
    let popup_area = centered_rect(60, 30, area);

    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, p.style_error())),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue", p.style_text_muted())),
    ];

    let alert = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Incomplete request ")
                .borders(Borders::ALL)
                .border_style(p.style_border_focus())
                .style(p.style_dialog_bg()),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(alert, popup_area);
}
