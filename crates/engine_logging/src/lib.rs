#![deny(missing_docs)]
//! Shared logging utilities for the giveaway workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is
//! prefixed with the entry-loop cycle it was emitted in.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the current entry-loop cycle.
    static CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Sets the cycle number for the current thread.
/// The engine calls this each time it starts refreshing the session.
pub fn set_cycle(cycle: u64) {
    CYCLE.with(|v| v.set(cycle));
}

/// Retrieves the cycle number for the current thread.
/// Returns 0 before the first cycle has started.
pub fn current_cycle() -> u64 {
    CYCLE.with(|v| v.get())
}

/// Logs a debug-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info/progress message tagged with the current cycle.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a success message (info level, `success` target).
#[macro_export]
macro_rules! engine_success {
    ($($arg:tt)*) => {{
        log::info!(target: "success", "[cycle {}] [success] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current cycle.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[cycle {}] {}", $crate::current_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_is_thread_local() {
        set_cycle(7);
        assert_eq!(current_cycle(), 7);
        let other = std::thread::spawn(current_cycle).join().unwrap();
        assert_eq!(other, 0);
    }
}
