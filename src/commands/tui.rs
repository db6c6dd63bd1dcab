//! TUI command implementation

use anyhow::{Context, Result};
use crossterm::{
    cursor::Hide,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use posterform::tui::{handle_key_event, ui};
use posterform::{debug, set_palette_from_str, App, Config, IssueRequest};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Input pause after which the highlighted preview is checked
const CHECK_IDLE: Duration = Duration::from_millis(150);

/// Run the TUI application
pub fn run_tui() -> Result<()> {
    debug::init();

    // Load configuration
    let config = Config::load()?;

    if !set_palette_from_str(&config.palette) {
        debug::log(&format!("Unknown palette '{}', using cyberpunk", config.palette));
    }

    let mut app = App::from_config(&config)?;

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    execute!(
        stdout,
        crossterm::terminal::SetTitle("posterform - Map poster request")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        crossterm::cursor::Show,
        LeaveAlternateScreen
    )?;

    result?;

    if let Some(request) = app.outcome.take() {
        open_request(&request);
    }

    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw
        terminal.draw(|f| ui(f, app))?;

        // The loading frame is on screen, now fetch
        if app.pending_load {
            app.load_catalog();
            continue;
        }

        if let Some(url) = app.pending_preview.take() {
            if let Err(e) = webbrowser::open(&url) {
                debug::log_category("PREVIEW", &format!("failed to open {url}: {e}"));
            }
        }

        // Poll events (16ms ≈ 60fps); a queued preview check waits for a
        // pause in input so scrolling through the gallery never blocks
        let idle = if app.pending_check {
            CHECK_IDLE
        } else {
            Duration::from_millis(16)
        };
        if event::poll(idle)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug::log(&format!(
                        "KEY_EVENT: {:?}, focus={:?}, mode={:?}",
                        key.code, app.focus, app.mode
                    ));
                    handle_key_event(app, key);
                }
                _ => {}
            }
        } else if app.pending_check {
            app.run_pending_check();
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Hand the encoded request to the browser; the URL is always printed
fn open_request(request: &IssueRequest) {
    println!("{}", request.title);
    println!("{}", request.url);

    match webbrowser::open(&request.url) {
        Ok(()) => println!("\nOpened the request form in your browser."),
        Err(e) => {
            debug::log_category("SUBMIT", &format!("browser failed: {e}"));
            println!("\nCould not open a browser; open the URL above to file the request.");
        }
    }
}
