//! Structured logging setup.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the binary (or to the embedding application).

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogConfig, LogFormat};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured filter when set. Output goes to
/// stderr so stdout stays clean for command output.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Pretty => {
            subscriber
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .init();
        }
        LogFormat::Json => {
            subscriber
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_target(true)
                        .with_writer(io::stderr),
                )
                .init();
        }
    }
}
