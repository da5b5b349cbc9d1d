//! HTTP API for the tournament records server.
//!
//! # Modules
//!
//! - [`tournaments`]: Create, list and delete tournament records
//! - [`error`]: Error type and its HTTP status mapping
//! - [`request_id`]: Request correlation ids, request logging and HTTP metrics
//!
//! # Endpoints Overview
//!
//! - `POST /api/tournaments` - Record a tournament result
//! - `GET /api/tournaments` - List records, most recent date first
//! - `DELETE /api/tournaments/{id}` - Delete a record
//! - `GET /health` - Server health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use pt_server::api::{create_router, AppState};
//! use poker_tracker::TournamentManager;
//! use poker_tracker::db::{Database, DatabaseConfig};
//! use std::sync::Arc;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let db = Database::new(&DatabaseConfig::development()).await?;
//! let state = AppState {
//!     tournament_manager: Arc::new(TournamentManager::from_pool(Arc::new(db.pool().clone()))),
//! };
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is permissive so browser front-ends on any origin can call the API.
//! No endpoint requires authentication.

pub mod error;
pub mod request_id;
pub mod tournaments;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get},
};
use poker_tracker::TournamentManager;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request (cheap due to Arc wrappers). Holds no mutable
/// state: the manager forwards each call to the store.
#[derive(Clone)]
pub struct AppState {
    pub tournament_manager: Arc<TournamentManager>,
}

/// Build the router: tournament routes and `/health`, wrapped in request ids and CORS.
///
/// ```text
/// GET    /health                  - Health check
/// POST   /api/tournaments         - Create tournament
/// GET    /api/tournaments         - List tournaments
/// DELETE /api/tournaments/{id}    - Delete tournament
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/tournaments",
            get(tournaments::list_tournaments).post(tournaments::create_tournament),
        )
        .route("/api/tournaments/{id}", delete(tournaments::delete_tournament))
        // Set before the layers below so unmatched paths get them too
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        // Outermost, so CORS preflight responses carry an id too
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<error::ErrorResponse>) {
    let body = error::ErrorResponse {
        error: "Not found".to_string(),
    };
    (StatusCode::NOT_FOUND, Json(body))
}

/// `GET /health`: reports whether the tournament store answers.
///
/// Returns `200 OK` if the store answers, or `503 Service Unavailable` otherwise.
///
/// ```bash
/// curl http://localhost:5000/health
/// # {"status":"healthy","version":"1.0.0","database":true,"timestamp":"2026-01-01T10:30:00+00:00"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = match state.tournament_manager.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            false
        }
    };

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
