use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::core::config::Settings;

/// Installs the global tracing subscriber. A `RUST_LOG` filter in the
/// environment wins over the configured log level.
pub(crate) fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let telemetry = settings.telemetry();
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(telemetry.log_level.as_str()),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE);

    let result = if telemetry.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|err| anyhow::anyhow!("tracing init failed: {err}"))
}
