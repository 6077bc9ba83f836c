use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

pub mod error;
pub mod handlers;
pub mod page;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7860;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/config", get(handlers::ui_config))
        .route("/api/health", get(handlers::health))
        .route("/api/summarize", post(handlers::summarize))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(Arc::new(state))
}

/// Binds the listener and serves until the process is stopped.
pub async fn serve(config: &ServerConfig, state: AppState) -> brief_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let local: SocketAddr = listener.local_addr()?;
    info!("🌐 Running on local URL: http://{}", local);
    axum::serve(listener, app).await?;
    Ok(())
}
