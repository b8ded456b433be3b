//! Shared building blocks for the `crprobe` workspace.
//!
//! * [`config`]: environment file loading and credential validation.
//! * [`tag`]: the player tag model and its URL encoding.
//! * [`error`]: error types raised before any network activity happens.
//!
//! The logging macros below wrap [`tracing`] so every crate reports through
//! the same subscriber that the CLI installs.

pub mod config;
pub mod error;
pub mod tag;

pub use tracing;

/// Target used for events that should render as a success line.
pub const SUCCESS_TARGET: &str = "crprobe::success";

/// Target used for pre-styled terminal lines that are printed verbatim.
pub const PRINT_TARGET: &str = "crprobe::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}
