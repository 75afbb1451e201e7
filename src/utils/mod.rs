pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the diagnostic subscriber once. The filter comes from
/// `RTRIPLOG_LOG` (e.g. `rtriplog=debug`) and defaults to `warn`; output goes
/// to stderr.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_env("RTRIPLOG_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // a subscriber may already be installed by an embedding program
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
