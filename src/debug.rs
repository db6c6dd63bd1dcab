//! Debug logging utilities
//!
//! Provides debug logging that only activates in debug builds.
//! In release builds, every logging call is a no-op.
//!
//! The terminal belongs to the TUI while it runs, so log lines go to
//! `debug.log` in the current directory instead of stderr.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

static DEBUG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// Initialize debug logging (only in debug builds)
#[cfg(debug_assertions)]
pub fn init() {
    let mut file_guard = DEBUG_FILE.lock().unwrap_or_else(|e| e.into_inner());
    if file_guard.is_none() {
        if let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open("debug.log")
        {
            *file_guard = Some(file);
            drop(file_guard);
            log("=== posterform session started ===");
        }
    }
}

#[cfg(not(debug_assertions))]
pub fn init() {}

/// Log a message to debug.log (only in debug builds)
#[cfg(debug_assertions)]
pub fn log(message: &str) {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, message);

    if let Ok(mut file_guard) = DEBUG_FILE.lock() {
        if let Some(ref mut file) = *file_guard {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
    }
}

#[cfg(not(debug_assertions))]
pub fn log(_message: &str) {}

/// Log a message with a category prefix
#[cfg(debug_assertions)]
pub fn log_category(category: &str, message: &str) {
    log(&format!("[{}] {}", category, message));
}

#[cfg(not(debug_assertions))]
pub fn log_category(_category: &str, _message: &str) {}

/// Log catalog lifecycle events (fetch start, result, preview probes)
#[cfg(debug_assertions)]
pub fn log_catalog(source: &str, outcome: &str) {
    log(&format!("[CATALOG] {} | {}", source, outcome));
}

#[cfg(not(debug_assertions))]
pub fn log_catalog(_source: &str, _outcome: &str) {}

/// Log an outgoing request URL, truncated
#[cfg(debug_assertions)]
pub fn log_request(url: &str) {
    let truncated = if url.len() > 200 {
        format!("{}...", url.chars().take(200).collect::<String>())
    } else {
        url.to_string()
    };
    log(&format!("[REQUEST] {}", truncated));
}

#[cfg(not(debug_assertions))]
pub fn log_request(_url: &str) {}

