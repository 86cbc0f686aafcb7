//! Logging shorthands shared by every crate of the workspace.
//!
//! Library code only emits `tracing` events; the binary decides how they are
//! rendered. `success!` is an info event on its own target so the terminal
//! formatter can highlight it.

pub const SUCCESS_TARGET: &str = "rdpctl::success";
pub const PRINT_TARGET: &str = "rdpctl::print";
/// Dispatcher reports addressed to the operator rather than to diagnostics.
pub const REPORT_TARGET: &str = "rdpctl::report";

/// Targets that carry operator output and stay visible at any log level.
pub const OPERATOR_TARGETS: [&str; 3] = [PRINT_TARGET, SUCCESS_TARGET, REPORT_TARGET];

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "rdpctl::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
