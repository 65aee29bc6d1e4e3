use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Installs the global subscriber. Levels come from `TSM_LOG`
/// (e.g. `TSM_LOG=tsm_algorithms=trace,tsm_runner=debug`), falling back to
/// `tsm=info`. Logs go to stderr; stdout is reserved for reports.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("TSM_LOG").unwrap_or_else(|_| EnvFilter::new("tsm=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
