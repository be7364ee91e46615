//! Logging utilities
//!
//! Thin helpers over the `log` facade. Nothing is printed unless the host
//! installs a logger (`console_log` in the browser, `env_logger` in the sim).

#![allow(unused)]

const TARGET: &str = "wordmatch";

/// Log an info message
#[inline]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{msg}");
}

/// Log a warning message
#[inline]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{msg}");
}

/// Log an error message
#[inline]
pub fn error(msg: &str) {
    ::log::error!(target: TARGET, "{msg}");
}

/// Log a debug message with a label
#[inline]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{label}] {msg}");
}

/// Log an action being performed
#[inline]
pub fn action(name: &str, details: &str) {
    ::log::info!(target: TARGET, "ACTION {name}: {details}");
}

/// Log a one-line session summary
#[inline]
pub fn session_summary(
    phase: &str,
    completed: u32,
    card_count: u32,
    combo: u32,
    queued: usize,
    pending: usize,
) {
    ::log::debug!(
        target: TARGET,
        "phase={phase} completed={completed}/{card_count} combo={combo} queued={queued} pending={pending}"
    );
}
