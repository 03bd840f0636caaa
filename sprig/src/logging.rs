use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

// Logs go to stderr; stdout carries only the computed result.
pub fn init(level: Option<&str>) {
    INIT.call_once(|| {
        if tracing::dispatcher::has_been_set() {
            return;
        }

        let directive = match level {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        };

        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
            eprintln!("WARN: invalid log filter '{directive}': {e}; falling back to 'warn'");
            EnvFilter::new("warn")
        });

        let fmt = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact();

        let registry = tracing_subscriber::registry().with(filter).with(fmt);

        #[cfg(feature = "tracy")]
        let registry = registry.with(tracing_tracy::TracyLayer::default());

        let _ = registry.try_init();
    });
}
