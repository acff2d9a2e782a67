//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "MASTERY_LOG";

/// Filter used when `MASTERY_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "mastery_core=info,mastery_analysis=info,mastery_cli=info";

/// Initialize the tracing/logging system.
///
/// Reads `MASTERY_LOG` for per-crate log levels, e.g.
/// `MASTERY_LOG=mastery_analysis=debug,mastery_cli=info`.
/// Events go to stderr so record output on stdout stays clean.
///
/// Idempotent: calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .init();
    });
}
