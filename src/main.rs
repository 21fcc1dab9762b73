//! News Category Classifier API Server

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_classifier_api::{
    config::{Config, LogFormat},
    classifier::ClassifierHandle,
    prediction_log::PredictionLog,
    create_router, AppState, PredictionService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("News classifier API starting ({})...", config.environment);

    let log = Arc::new(
        PredictionLog::open(&config.logs_output_path)
            .with_context(|| format!("failed to open {}", config.logs_output_path.display()))?,
    );

    // Load classifier. A failure here is not fatal: handlers retry the load.
    let classifier = ClassifierHandle::from_path(config.model_path.clone());
    let startup = classifier.clone();
    match tokio::task::spawn_blocking(move || startup.init()).await? {
        Ok(()) => tracing::info!("Setup completed"),
        Err(e) => tracing::error!("Classifier not loaded at startup, will retry on first request: {}", e),
    }

    let state = AppState {
        service: Arc::new(PredictionService::new(classifier, log.clone())),
        config: config.clone(),
    };

    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down application");
    log.shutdown();

    Ok(())
}

fn init_tracing(config: &Config) {
    let default_filter = if config.is_production() {
        "news_classifier_api=info,tower_http=info"
    } else {
        "news_classifier_api=debug,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
}
