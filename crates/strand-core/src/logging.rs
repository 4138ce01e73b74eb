//! Structured logging with `tracing`.
//!
//! Every strand crate logs through the `tracing` macros; only binaries call
//! [`init_subscriber`]. `RUST_LOG` takes precedence over the configured level.

/// Initialize the global tracing subscriber with stderr output only.
///
/// Call once at application startup. Subsequent calls are no-ops.
/// The subscriber writes compact human-readable output to stderr so that
/// stdout stays free for command output.
///
/// # Arguments
///
/// * `level` - Minimum log level or filter directive (e.g. `"warn"`,
///   `"strand_chain=debug"`).
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // try_init fails if a global subscriber is already installed
    let _ = subscriber.try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
