//! Tracing subscriber wiring.
//!
//! Every crate in the workspace emits `tracing` spans and structured events;
//! this is the only place a subscriber is installed. Output goes to stderr so
//! stdout carries nothing but command results.

use tracing_subscriber::EnvFilter;

use crate::settings::LogFormat;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over everything. Otherwise `-v`/`-vv` raise the level and
/// `default_level` (from settings) applies.
pub fn init(format: LogFormat, default_level: &str, verbose: u8) {
    let directive = match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
