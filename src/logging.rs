use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. The level comes from `RUST_LOG`
/// (default `info`). Logs go to stderr so they don't tear the status
/// table on stdout.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .init();
}
