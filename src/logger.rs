//! Terminal logging with box-drawing structure.
//!
//! All user-facing output of the `miqat` binary goes through these macros so
//! the table, diagnostics and errors share one visual flow:
//!
//! ```text
//! ┏ miqat v0.1.0 ━━╸
//! ┃
//! ┣ Prayer times for 2021-01-01
//! ┃   Fajr      05:39:32
//! ┃   ...
//! ╹
//! ```
//!
//! ## Conventions
//!
//! - `log_version!` once at startup, `log_end!` once at exit.
//! - `log_block_start!` opens a new block (adds a spacer pipe above it).
//! - `log_decorated!` continues a block, `log_indented!` lists details under it.
//! - `log_pipe!` inserts a spacer line, usually before a semantic message.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!` and
//!   `log_critical!` carry a colored `[LEVEL]` tag.
//! - `log_error_exit!` closes the flow with `┗` on a fatal error.
//!
//! Logging can be switched off globally with [`Log::set_enabled`], which the
//! binary does for JSON output.

use std::cell::RefCell;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

thread_local! {
    // Per-thread capture buffer, only set inside `Log::capture`
    static CAPTURE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Line decoration for one log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Block,
    Decorated,
    Indented,
    Pipe,
    Version,
    End,
    Info,
    Warning,
    Error,
    ErrorExit,
    Debug,
    Critical,
}

impl Style {
    fn render(self, message: &str) -> String {
        match self {
            Style::Block => format!("┃\n┣ {message}\n"),
            Style::Decorated => format!("┣ {message}\n"),
            Style::Indented => format!("┃   {message}\n"),
            Style::Pipe => "┃\n".to_string(),
            Style::Version => format!("┏ {message} ━━╸\n"),
            Style::End => "╹\n".to_string(),
            Style::Info => format!("┣[\x1b[32mINFO\x1b[0m] {message}\n"),
            Style::Warning => format!("┣[\x1b[33mWARNING\x1b[0m] {message}\n"),
            Style::Error => format!("┣[\x1b[31mERROR\x1b[0m] {message}\n"),
            Style::ErrorExit => format!("┃\n┗[\x1b[31mERROR\x1b[0m] {message}\n"),
            Style::Debug => format!("┣[\x1b[36mDEBUG\x1b[0m] {message}\n"),
            Style::Critical => format!("┣[\x1b[31mCRITICAL\x1b[0m] {message}\n"),
        }
    }
}

/// Global switch and helpers for the logging macros.
pub struct Log;

impl Log {
    /// Enable or disable all logging output.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Run `f` and return everything it logged on this thread instead of
    /// printing it. ANSI color codes are stripped.
    pub fn capture<F: FnOnce()>(f: F) -> String {
        let previous = CAPTURE.with(|c| c.borrow_mut().replace(String::new()));
        f();
        let captured = CAPTURE.with(|c| std::mem::replace(&mut *c.borrow_mut(), previous));
        strip_ansi_codes(&captured.unwrap_or_default())
    }
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            // ESC [ ... m
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Render and write one log line. Used by the macros.
pub fn emit(style: Style, message: &str) {
    if !Log::is_enabled() {
        return;
    }

    let formatted = style.render(message);
    let captured = CAPTURE.with(|c| match c.borrow_mut().as_mut() {
        Some(buffer) => {
            buffer.push_str(&formatted);
            true
        }
        None => false,
    });

    if !captured {
        print!("{formatted}");
        let _ = std::io::stdout().flush();
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_styled {
    ($style:ident, $fmt:literal $($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Style::$style, &format!($fmt $($arg)*))
    };
    ($style:ident, $expr:expr) => {
        $crate::logger::emit($crate::logger::Style::$style, &($expr).to_string())
    };
}

/// Open a new block of related output.
#[macro_export]
macro_rules! log_block_start {
    ($($arg:tt)+) => { $crate::__log_styled!(Block, $($arg)+) };
}

/// Continue the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($arg:tt)+) => { $crate::__log_styled!(Decorated, $($arg)+) };
}

/// Detail line nested under the current block.
#[macro_export]
macro_rules! log_indented {
    ($($arg:tt)+) => { $crate::__log_styled!(Indented, $($arg)+) };
}

/// Empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::logger::emit($crate::logger::Style::Pipe, "")
    };
}

/// Startup header with the package version.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::logger::emit(
            $crate::logger::Style::Version,
            concat!("miqat v", env!("CARGO_PKG_VERSION")),
        )
    };
}

/// Final termination marker.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::logger::emit($crate::logger::Style::End, "")
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => { $crate::__log_styled!(Info, $($arg)+) };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => { $crate::__log_styled!(Warning, $($arg)+) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => { $crate::__log_styled!(Error, $($arg)+) };
}

/// Fatal error that ends the output flow.
#[macro_export]
macro_rules! log_error_exit {
    ($($arg:tt)+) => { $crate::__log_styled!(ErrorExit, $($arg)+) };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => { $crate::__log_styled!(Debug, $($arg)+) };
}

#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => { $crate::__log_styled!(Critical, $($arg)+) };
}
