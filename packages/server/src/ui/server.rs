//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::SessionHandle;

use super::{
    handler::{get_session, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// Liar Auction game server
///
/// # Example
///
/// ```ignore
/// let session = spawn_session(pusher, SessionConfig::default(), clock, rng);
/// Server::new(session).run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    session: SessionHandle,
}

impl Server {
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            session: self.session,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/session", get(get_session))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        tracing::info!(
            "Liar Auction server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
