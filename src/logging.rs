//! Tracing subscriber setup.
//!
//! `RUST_LOG` controls the filter; without it only this crate's `info`
//! events (and above) are shown.

use tracing_subscriber::EnvFilter;

/// Default filter directives when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "sheet_notifier=info,send_manual=info";

/// Install the global fmt subscriber with the default directives.
///
/// Returns `false` if a subscriber was already installed (tests, embedding
/// applications); that is not treated as an error.
pub fn init() -> bool {
    init_with_default(DEFAULT_DIRECTIVES)
}

/// Install the global fmt subscriber, falling back to `default_directives`
/// when `RUST_LOG` is unset or unparseable.
pub fn init_with_default(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
