//! Tracing setup for hosts and demos.

/// Default filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "error,slidepay_ui=info,slidepay_components=info";

/// Installs a pretty `tracing-subscriber` formatter.
///
/// The filter comes from `RUST_LOG` when it parses, otherwise
/// [`DEFAULT_FILTER`]. Calling this more than once is harmless: only the
/// first subscriber is installed.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Same as [`init_tracing`] with a caller supplied fallback filter.
pub fn init_tracing_with(fallback: &str) {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(fallback) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .try_init();
}
