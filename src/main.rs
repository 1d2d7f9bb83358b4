use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lottery_live::adapters::history::{connect, InMemoryHistoryRepository, PostgresHistoryRepository};
use lottery_live::adapters::http::{api_router, cors_layer, HistoryAppState, LiveAppState};
use lottery_live::adapters::SystemClock;
use lottery_live::application::LiveDrawService;
use lottery_live::config::{AppConfig, DatabaseConfig, LogFormat, ServerConfig};
use lottery_live::ports::{HistoryReader, HistorySink};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let (sink, reader) = history_backend(config.database.as_ref()).await;

    let live = Arc::new(LiveDrawService::new(
        config.live.service_config()?,
        sink.clone(),
        Arc::new(SystemClock),
    ));

    let app = api_router(
        LiveAppState::new(live.clone()),
        HistoryAppState::new(sink, reader),
        cors_layer(&config.server.cors_origins_list()),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Lottery live server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            live.shutdown();
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Pick the archive store: PostgreSQL when configured and reachable,
/// otherwise an in-memory store so the live feed keeps working.
async fn history_backend(
    database: Option<&DatabaseConfig>,
) -> (Arc<dyn HistorySink>, Arc<dyn HistoryReader>) {
    if let Some(database) = database {
        match connect(database).await {
            Ok(pool) => {
                tracing::info!("History database connected");
                let repository = Arc::new(PostgresHistoryRepository::new(pool));
                return (repository.clone(), repository);
            }
            Err(e) => {
                tracing::warn!(error = %e, "History database unavailable, continuing with in-memory history");
            }
        }
    } else {
        tracing::warn!("No database configured, history is kept in memory only");
    }

    let repository = Arc::new(InMemoryHistoryRepository::new());
    (repository.clone(), repository)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, closing gracefully");
}
