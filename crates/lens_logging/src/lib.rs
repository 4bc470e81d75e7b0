#![deny(missing_docs)]
//! Logging facade shared by the Allegation Lens crates.
//!
//! All crates log through the `lens_*` macros rather than `log` directly, so
//! the backend can be swapped in one place. Lines about a request name its
//! submission id explicitly.

#[doc(hidden)]
pub use log;

/// Logs at `$level`. The level macros below wrap this.
#[macro_export]
macro_rules! lens_log {
    ($level:expr, $($arg:tt)*) => {{
        $crate::log::log!($level, $($arg)*);
    }};
}

/// Trace-level `lens_log!`.
#[macro_export]
macro_rules! lens_trace {
    ($($arg:tt)*) => { $crate::lens_log!($crate::log::Level::Trace, $($arg)*) };
}

/// Debug-level `lens_log!`.
#[macro_export]
macro_rules! lens_debug {
    ($($arg:tt)*) => { $crate::lens_log!($crate::log::Level::Debug, $($arg)*) };
}

/// Info-level `lens_log!`.
#[macro_export]
macro_rules! lens_info {
    ($($arg:tt)*) => { $crate::lens_log!($crate::log::Level::Info, $($arg)*) };
}

/// Warn-level `lens_log!`.
#[macro_export]
macro_rules! lens_warn {
    ($($arg:tt)*) => { $crate::lens_log!($crate::log::Level::Warn, $($arg)*) };
}

/// Error-level `lens_log!`.
#[macro_export]
macro_rules! lens_error {
    ($($arg:tt)*) => { $crate::lens_log!($crate::log::Level::Error, $($arg)*) };
}

/// Installs a stderr logger for tests. Later calls, from any test, are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Never);
}
