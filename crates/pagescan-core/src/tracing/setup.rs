//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the pagescan tracing/logging system.
///
/// Reads the `PAGESCAN_LOG` environment variable for per-subsystem log
/// levels. Format: `PAGESCAN_LOG=walker=debug,attribution=info,checkers=warn`
///
/// Falls back to `pagescan=info` if `PAGESCAN_LOG` is not set or is invalid.
///
/// This function is idempotent — calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("PAGESCAN_LOG")
            .unwrap_or_else(|_| EnvFilter::new("pagescan=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
