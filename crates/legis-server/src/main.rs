//! legis-server - upload server binary.

use std::net::SocketAddr;

use legis_server::{create_server, AppState, ServerConfig};
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("legis_server=debug".parse()?),
        )
        .init();

    // File settings first, environment on top
    let config = match std::env::var("LEGIS_CONFIG") {
        Ok(path) => ServerConfig::from_file(&path)?.merge_env()?,
        Err(_) => ServerConfig::from_env()?,
    };

    info!(
        input = %config.pipeline.input_dir.display(),
        output = %config.pipeline.output_dir.display(),
        uploads = %config.upload_dir().display(),
        parse_on_upload = config.parse_on_upload,
        "Configuration loaded"
    );

    let addr: SocketAddr = config.bind_addr().parse()?;
    let app = create_server(AppState::new(config));

    info!("Starting legis-server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
