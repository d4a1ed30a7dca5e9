use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// `LOG_LEVEL` and `LOG_FORMAT` override the configured values; `RUST_LOG`
/// directives take precedence over both when set. Output goes to stderr so
/// binaries that print JSON on stdout keep it clean.
pub fn init(settings: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    // A second init (e.g. from tests) is not an error worth surfacing
    let _ = if format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.compact().try_init()
    };
}
