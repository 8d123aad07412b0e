use axum::{
    routing::{get, post},
    Router,
};
use log;
use std::net::SocketAddr;
use std::sync::Arc;
use stderrlog::{self, Timestamp};
use tag_resolver::app_state::AppState;
use tag_resolver::config::Config;
use tag_resolver::database::{self, MemoryTagStore, MySqlTagStore, TagStore};
use tag_resolver::handlers;
use tag_resolver::services::tag_service::TagResolver;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("FATAL ERROR: {}", e);
        eprintln!("Error details: {:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    stderrlog::new()
        .verbosity(log::Level::Info)
        .timestamp(Timestamp::Millisecond)
        .show_module_names(true)
        .init()?;

    log::info!("=== Tag Resolver Service Starting ===");
    log::info!("Process ID: {}", std::process::id());

    match dotenvy::dotenv() {
        Ok(_) => log::info!("Environment variables loaded from .env file"),
        Err(_) => log::info!("No .env file found, using system environment variables"),
    }

    log::info!("Loading configuration...");
    let config = Config::load();
    log::info!("Server port: {}", config.port);
    log::info!("RUST_LOG: {}", config.rust_log);
    log::info!("Tag table: {} ({}, {})", config.schema.table, config.schema.id_column, config.schema.name_column);
    log::info!("Max batch size: {}", config.max_batch_size);

    let store: Arc<dyn TagStore> = if config.use_memory_store {
        log::warn!("USE_MEMORY_STORE is set, tags will not outlive the process");
        Arc::new(MemoryTagStore::new())
    } else {
        log::info!("Creating database connection pool...");
        let pool = database::create_pool(&config).await?;

        log::info!("Initializing database schema...");
        database::schema::initialize_schema(&pool, &config.schema).await?;

        Arc::new(MySqlTagStore::new(pool, config.schema.clone()))
    };

    let app_state = AppState {
        resolver: TagResolver::new(store),
        max_batch_size: config.max_batch_size,
        service_name: config.service_name.clone(),
    };

    let app = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server listening on {}", addr);
    log::info!("=== Tag Resolver Service Ready ===");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shutdown complete");
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/tags", post(handlers::tags::create_tag))
        .route("/api/v1/tags/resolve", post(handlers::tags::resolve_tags))
        .route("/api/v1/tags/search", get(handlers::tags::search_tags))
        .route("/api/v1/tags/normalize", get(handlers::tags::normalize_tag))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            log::info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
