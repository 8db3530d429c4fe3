//! `api` crate — HTTP layer.
//!
//! Exposes:
//!   POST   /squad
//!   GET    /health
//!
//! Every `/squad` response is a JSON envelope (see [`envelope`]).

pub mod envelope;
pub mod error;
pub mod handlers;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info};

use engine::SquadWorkflow;
use store::SquadStore;

pub use error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub workflow: SquadWorkflow,
}

impl AppState {
    pub fn new(store: Arc<dyn SquadStore>) -> Self {
        Self { workflow: SquadWorkflow::new(store) }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/squad", post(handlers::squads::create))
        .route("/health", get(handlers::health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind` and serve until the process is stopped.
pub async fn serve(bind: &str, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(detail, "Recovered from panic");
    envelope::write_failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
