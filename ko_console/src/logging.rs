//! Structured logging configuration.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels come from `RUST_LOG`, defaulting to `info` with engine debug
/// output. Output goes to stderr so it never interleaves with rendered
/// brackets on stdout. Records emitted through the `log` facade by the engine
/// are forwarded into the same subscriber.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,knockout=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Structured logging initialized");
}

/// Log a rejected operator command with structured data
pub fn log_rejected_command(command: &str, reason: &str) {
    tracing::warn!(command = command, reason = reason, "Command rejected");
}
