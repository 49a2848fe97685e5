//! Tracing subscriber setup for applications embedding the registry.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when neither `debug` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "hasprobe=info";

/// Build the filter used by [`init_tracing`].
///
/// Log level is controlled by:
/// 1. An explicit directive (e.g. from the config's `log_filter`)
/// 2. `debug` sets level to DEBUG
/// 3. `RUST_LOG` environment variable (if set)
/// 4. Default is INFO
pub fn build_filter(directive: Option<&str>, debug: bool) -> EnvFilter {
    if let Some(directive) = directive {
        if let Ok(filter) = EnvFilter::try_new(directive) {
            return filter;
        }
    }
    if debug {
        EnvFilter::new("hasprobe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(directive: Option<&str>, debug: bool) -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(build_filter(directive, debug))
        .try_init()
        .is_ok()
}
