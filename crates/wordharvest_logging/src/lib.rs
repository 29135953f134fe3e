#![deny(missing_docs)]
//! Shared logging utilities for the wordharvest workspace.
//!
//! This crate provides the `harvest_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. While a page is being
//! processed the session driver records its index here, and every macro
//! prefixes its message with `[page N]`.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Thread-local storage for the page currently being processed.
    static PAGE_INDEX: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Records the page index being processed on the current thread.
pub fn set_page_context(page_index: u64) {
    PAGE_INDEX.with(|v| v.set(Some(page_index)));
}

/// Clears the page context for the current thread.
pub fn clear_page_context() {
    PAGE_INDEX.with(|v| v.set(None));
}

/// Retrieves the page index for the current thread, if one is set.
pub fn current_page() -> Option<u64> {
    PAGE_INDEX.with(|v| v.get())
}

/// Message prefix derived from the current page context.
#[doc(hidden)]
pub fn page_prefix() -> String {
    match current_page() {
        Some(page) => format!("[page {page}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! harvest_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("{}{}", $crate::page_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! harvest_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("{}{}", $crate::page_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! harvest_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("{}{}", $crate::page_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! harvest_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("{}{}", $crate::page_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! harvest_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("{}{}", $crate::page_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple stderr logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}
