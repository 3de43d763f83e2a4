//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "weather_agent_service=info";

/// Output flavour for the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines on stdout
    Compact,
    /// Human-readable lines on stderr, keeping stdout free for protocol frames
    Stderr,
    /// One JSON object per event, for log collectors such as CloudWatch
    Json,
}

pub fn init_logging(format: LogFormat) {
    // Use RUST_LOG if set, otherwise default to info level for our crate
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => {
            let format = fmt::format()
                .with_target(true)
                .with_thread_ids(true)
                .compact();
            registry.with(fmt::layer().event_format(format)).init();
        }
        LogFormat::Stderr => {
            registry
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_ansi(false)
                        .compact(),
                )
                .init();
        }
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_current_span(false).without_time())
                .init();
        }
    }
}
