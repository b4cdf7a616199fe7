//! PetPal service binary.
//!
//! Loads configuration, wires the Groq-backed chat service, and serves
//! the REST API until interrupted.

use std::path::Path;
use std::process;
use std::sync::Arc;

use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pet_pal::adapters::ai::{GroqConfig, GroqModel};
use pet_pal::adapters::http::{api_router, AppState};
use pet_pal::application::ChatService;
use pet_pal::config::{AppConfig, ServerConfig};
use pet_pal::domain::content::{load_persona, ContentLibrary};

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            process::exit(1);
        }
    };

    init_tracing(&config);

    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {err}");
        eprintln!("Set PETPAL__AI__GROQ_API_KEY to your Groq API key.");
        process::exit(1);
    }

    let persona = load_persona(config.ai.persona_path.as_deref().map(Path::new));
    let library = ContentLibrary::standard().clone().with_persona(persona);

    let model = GroqModel::new(GroqConfig::from_app_config(&config.ai));
    let service = Arc::new(ChatService::with_library(Arc::new(model), library));

    let app = api_router(AppState::new(service)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server))
            .layer(TimeoutLayer::new(config.server.request_timeout())),
    );

    let addr = config.server.socket_addr();
    info!(%addr, environment = ?config.server.environment, "starting PetPal chat service");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("Failed to bind {addr}: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {err}");
        process::exit(1);
    }

    info!("PetPal chat service stopped");
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` when set.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the CORS layer: explicit origins when configured, otherwise
/// permissive for development convenience.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Resolves when the process receives an interrupt.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown signal: {err}");
    }
}
