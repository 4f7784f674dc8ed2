// ==========================================
// PIAR Portal - logging setup
// ==========================================
// tracing + tracing-subscriber, level from RUST_LOG
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for the application.
///
/// # Environment
/// - RUST_LOG: filter directives (default: info),
///   e.g. RUST_LOG=debug or RUST_LOG=piar_portal=trace
///
/// # Example
/// ```no_run
/// use piar_portal::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Same as [`init`] but emitting JSON lines, for log collection.
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().json().with_env_filter(filter).with_current_span(false).init();
}

/// Logging for tests: debug level, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
