#![deny(missing_docs)]
//! Shared logging utilities for the sheets workspace.
//!
//! This crate provides the `sheets_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every macro logs
//! under the [`TARGET`] target so the pipeline can be filtered as one unit.

/// Log target shared by all pipeline crates.
pub const TARGET: &str = "sheets";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! sheets_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! sheets_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! sheets_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! sheets_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! sheets_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Shortens an identifier for log lines; spreadsheet ids are long and noisy.
pub fn short_id(id: &str) -> &str {
    const KEEP: usize = 12;
    match id.char_indices().nth(KEEP) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Initializes a simple terminal logger for use in tests.
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
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
