//! Tracing and logging setup shared by every binary in the workspace.

/// Initialize process-wide logging with the default filter (`info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(None);
}

/// Initialize logging with `level` as the fallback filter when `RUST_LOG` is unset.
pub fn init_with_level(level: &str) {
    tracing::init(Some(level));
}

/// Tracing configuration (filters, layers).
pub mod tracing;
