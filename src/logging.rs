//! Tracing setup for host applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "ielts_notebook=debug";

/// Install a fmt subscriber filtered by `RUST_LOG` (or `default_filter`).
///
/// Returns false if a global subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .try_init()
    .is_ok()
}
