use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing to stderr so stdout stays clean for command output.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    if tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        tracing::debug!(target: "system", "Tracing initialized");
    }
}

/// Convenience macros for common operations
#[macro_export]
macro_rules! trace_command {
    ($cmd:expr) => {
        tracing::info!(target: "command", "Running: {}", $cmd);
    };
}
