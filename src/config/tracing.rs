use tracing_forest::ForestLayer;
use tracing_subscriber::{filter, prelude::*, EnvFilter};

pub trait HttpTracingExt: tracing::Subscriber {
    /// Falls back to INFO for everything when `RUST_LOG` is unset.
    fn with_http_tracing(self) -> tracing_subscriber::layer::Layered<filter::Targets, Self>
    where
        Self: Sized,
    {
        self.with(
            filter::Targets::new()
                .with_target("tower_http", tracing::Level::INFO)
                .with_target("blogly", tracing::Level::INFO)
                .with_default(tracing::Level::WARN),
        )
    }
}

impl<S: tracing::Subscriber> HttpTracingExt for S {}

pub fn init() {
    let registry = tracing_subscriber::registry();
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => registry.with(env_filter).with(ForestLayer::default()).init(),
        Err(_) => registry.with_http_tracing().with(ForestLayer::default()).init(),
    }
}
