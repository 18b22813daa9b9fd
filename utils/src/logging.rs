//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset: everything at info, with
/// the HTTP stack quieted down.
const DEFAULT_DIRECTIVES: &str = "info,reqwest=warn,hyper=warn";

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; without it the console logs at info
/// level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
