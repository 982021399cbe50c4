//! Logging setup for the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingSettings};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so `show --json`
/// output on stdout stays machine-readable. Calling this twice is a no-op.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&settings.level)));

    let registry = tracing_subscriber::registry().with(filter);
    let fmt = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let result = match settings.format {
        LogFormat::Pretty => registry.with(fmt.pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt.compact()).try_init(),
        LogFormat::Json => registry.with(fmt.json()).try_init(),
    };
    if let Err(err) = result {
        tracing::debug!(%err, "logging already initialized");
    }
}

/// Filter used when `RUST_LOG` is unset: the library and both binaries at
/// `level`, everything else at `warn`.
fn default_directive(level: &str) -> String {
    format!("camctl={level},camctl_gui={level},warn")
}
