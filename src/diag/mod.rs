//! Best-effort diagnostic lines.
//!
//! Every line goes to the [`log`] facade at debug level under the `atomic_prims` target. If
//! [`ENV_VAR`] names a file, the line is also appended there by a background thread. Nothing in
//! here reports failure or blocks on I/O.

mod config;
mod writer;

use std::fmt;

pub use {
    config::{resolve_log_path, ENV_VAR},
    writer::flush,
};

/// Formats and emits one diagnostic line.
///
/// ```
/// atomic_prims::diag!("cell {:p} contended", &0u32);
/// ```
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {
        $crate::diag::write_line(format_args!($($arg)*))
    };
}

/// Emits one diagnostic line. Prefer the [`diag!`](crate::diag!) macro.
pub fn write_line(args: fmt::Arguments<'_>) {
    ::log::debug!(target: "atomic_prims", "{}", args);
    writer::submit(args);
}

/// `"NULL"` for a missing string, for logging optional values.
pub fn or_null(s: Option<&str>) -> &str {
    s.unwrap_or("NULL")
}
