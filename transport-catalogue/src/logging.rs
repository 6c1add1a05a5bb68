//! Tracing subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. An unparsable
/// value falls back to the default with a warning on stderr.
pub fn init() {
    let default_level = LevelFilter::INFO;
    let directives =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}': {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter);
    if let Err(err) = subscriber.try_init() {
        eprintln!("tracing subscriber already installed: {err}");
    }
}
