//! # MedQueue API
//!
//! HTTP surface for the MedQueue appointment scheduler.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests and hand them to the scheduler
//! - **Middleware**: Error mapping shared by every endpoint
//! - **Config**: Environment and scheduler configuration
//!
//! The API uses Axum as the web framework. Scheduling decisions are made by
//! `medqueue_core::scheduler::Scheduler` over a PostgreSQL-backed store.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared across handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    BoxError, Json, Router,
};
use eyre::Result;
use medqueue_core::scheduler::Scheduler;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Stateless scheduler over the configured store
    pub scheduler: Scheduler,
}

/// Builds the router with every route and the shared state attached.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking endpoint
        .merge(routes::appointment::routes())
        // Doctor capacity and slot listing endpoints
        .merge(routes::doctor::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and scheduler
///
/// Installs the tracing subscriber, attaches request tracing and the
/// request timeout, and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, scheduler: Scheduler) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState { scheduler });

    let app = app(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(config.request_timeout)),
        )
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        rollover_days = config.scheduler.rollover_days,
        queue_retries = config.scheduler.queue_retries,
        "Server listening on http://{}",
        addr
    );
    axum::serve(listener, app).await?;

    Ok(())
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out", "retryable": true })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Unhandled internal error: {}", err) })),
        )
    }
}
