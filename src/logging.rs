use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{GlueError, Result};

/// Installs the global subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init_logger() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| GlueError::Logging(format!("Failed to initialize logger: {e}")))
}
