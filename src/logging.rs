use crate::config::{Environment, LogFormat, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(env: &Environment) -> &'static str {
    match env {
        Environment::Dev => "itinerary_backend=debug,tower_http=debug,sqlx=warn,info",
        Environment::Staging => "itinerary_backend=debug,tower_http=info,sqlx=warn,info",
        Environment::Prod => "itinerary_backend=info,tower_http=info,sqlx=warn,warn",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the per-environment filter.
pub fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(&settings.env)));

    // Source locations only help while developing
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(settings.env.is_dev())
        .with_line_number(settings.env.is_dev());

    let registry = tracing_subscriber::registry().with(filter);
    match settings.log_format {
        LogFormat::Json => registry.with(fmt_layer.json()).init(),
        LogFormat::Pretty => registry.with(fmt_layer.pretty()).init(),
    }

    tracing::info!(
        env = ?settings.env,
        format = ?settings.log_format,
        "Logging initialized"
    );
}
