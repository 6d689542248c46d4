use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scan2md::api::{create_router, AppState};
use scan2md::config::Config;
use scan2md::ocr::OcrProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scan2md=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.ocr.api_key.is_none() {
        tracing::warn!(
            "OCR_API_KEY is not set — every request must supply its own x-api-key header."
        );
    }

    let ocr = OcrProvider::new(&config.ocr)?;
    let state = AppState::new(config.clone(), ocr);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("scan2md starting on http://{}", addr);
    tracing::info!("  Upload UI: http://{}/", addr);
    tracing::info!("  Endpoint:  POST http://{}/process", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
