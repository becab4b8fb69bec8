mod backend;
mod config;
mod protocol;
mod relay;
mod server;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use backend::{Backend, Hosted, HostedConfig, Ollama, OllamaConfig};
use config::{normalize_addr, Config};
use relay::Relay;

#[tokio::main]
async fn main() {
    let config = Config::parse();

    // Configure logging
    match config.log_format.as_str() {
        "json" => {
            tracing_subscriber::fmt().json().init();
        }
        _ => {
            tracing_subscriber::fmt().init();
        }
    }

    let backend: Arc<dyn Backend> = match config.backend.as_str() {
        "ollama" => Arc::new(Ollama::new(OllamaConfig {
            base_url: Some(config.ollama_host.clone()),
            model: config.model.clone(),
        })),
        "hosted" => {
            let api_key = match &config.hosted_api_key {
                Some(key) => {
                    if std::env::var("HOSTED_API_KEY").is_err() {
                        warn!("API key provided via command-line flag - use HOSTED_API_KEY env var in production");
                    }
                    key.clone()
                }
                None => {
                    error!("HOSTED_API_KEY is required for the hosted backend");
                    std::process::exit(1);
                }
            };
            Arc::new(Hosted::new(HostedConfig {
                base_url: Some(config.hosted_base_url.clone()),
                api_key,
                model: config.model.clone(),
            }))
        }
        other => {
            error!(backend = other, "unknown backend (expected \"ollama\" or \"hosted\")");
            std::process::exit(1);
        }
    };

    info!(
        backend = backend.name(),
        base_url = backend.base_url(),
        model = config.model,
        "using backend"
    );

    // Outbound HTTP client — connect timeout only, no retries
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|e| {
            error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        });

    let app = server::build_router(Relay::new(backend, http_client));

    let addr = normalize_addr(&config.addr);
    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|e| {
        error!(addr = addr, error = %e, "failed to bind");
        std::process::exit(1);
    });

    info!(addr = addr, "server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "server error");
            std::process::exit(1);
        });

    info!("server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
