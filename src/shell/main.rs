use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use workforce_time::modules::notifications::adapters::outbound::channel_sink::ChannelNotificationSink;
use workforce_time::shared::core::clock::{Clock, SystemClock};
use workforce_time::shared::infrastructure::in_memory::store::InMemoryStore;
use workforce_time::shared::infrastructure::sqlite::store::SqliteStore;
use workforce_time::shell::config::Settings;
use workforce_time::shell::state::{AppState, Ports};
use workforce_time::shell::workers::spawn_notification_relay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env().context("invalid configuration")?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let (sink, receiver) = ChannelNotificationSink::channel(settings.notification_buffer);
    let sink = Arc::new(sink);

    let ports = match &settings.database_path {
        Some(path) => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("cannot open database at {}", path.display()))?;
            tracing::info!(path = %path.display(), "using sqlite store");
            Ports::from_store(Arc::new(store), sink, clock.clone())
        }
        None => {
            tracing::warn!("DATABASE_PATH not set, data lives in memory only");
            Ports::from_store(Arc::new(InMemoryStore::new()), sink, clock.clone())
        }
    };

    let relay = spawn_notification_relay(receiver, ports.notifications.clone(), clock);
    let state = AppState::new(&ports, settings.missing_clockout_threshold_hours);
    drop(ports);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "HTTP endpoint: http://{}/", settings.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", settings.bind_addr);

    axum::serve(listener, workforce_time::shell::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Handlers (and their sink handles) are gone once serve returns, so the relay drains and ends.
    let stats = relay.await.context("notification relay panicked")?;
    tracing::info!(persisted = stats.persisted, failed = stats.failed, "shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "cannot listen for shutdown signal");
    }
}
