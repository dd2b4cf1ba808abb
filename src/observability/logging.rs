//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "FESTIVAL_LOG";

/// Build the log filter: `FESTIVAL_LOG` first, then the configured level.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!("festival_client={},reqwest=warn", config.log_level))
    })
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &ObservabilityConfig) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
