//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the stderr subscriber.
///
/// Levels come from `REFLECTS_LOG` (e.g. `REFLECTS_LOG=reflects_core=debug`),
/// falling back to `reflects=warn` when unset or invalid. Safe to call more
/// than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("REFLECTS_LOG")
            .unwrap_or_else(|_| EnvFilter::new("reflects=warn"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
