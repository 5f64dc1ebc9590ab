use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a compact stderr subscriber. `RUST_LOG`, when set, overrides
/// `filter`; an unparseable directive falls back to "warn".
///
/// Only the first call has any effect.
pub fn init(filter: &str) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| filter.to_string());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_level(true)
            .compact()
            .with_writer(std::io::stderr);

        let filter_layer = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init();
    });
}
