//! HealthiNet API server entry point.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use healthinet::adapters::session::InMemoryConversationRegistry;
use healthinet::app;
use healthinet::config::{AppConfig, ConfigError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    let addr = config.server.bind_addr()?;
    let registry = app::registry(&config);
    spawn_idle_sweeper(registry.clone());
    let app = app::router(registry, &config.server);

    tracing::info!(
        %addr,
        provider = ?config.analysis.provider,
        max_hops = config.pipeline.max_hops,
        "Starting HealthiNet API server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Sweeps abandoned conversations even when no new one is being created.
fn spawn_idle_sweeper(registry: InMemoryConversationRegistry) {
    let period = registry.idle_ttl() / 2;
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(period);
        loop {
            ticks.tick().await;
            registry.evict_idle().await;
        }
    });
}
