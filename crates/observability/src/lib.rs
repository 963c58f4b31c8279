//! Tracing/logging setup shared by the binaries.

/// Initialize process-wide tracing/logging in the given format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Subscriber configuration (filters, formats).
pub mod tracing;

pub use crate::tracing::{LOG_FORMAT_VAR, LogFormat};
