//! Tracing and logging setup shared by the catalog binaries.

/// Initialize process-wide tracing with the defaults (`info`, JSON lines).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(&tracing::TracingConfig::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
