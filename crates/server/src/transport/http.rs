//! HTTP/REST transport for Cellwatch server
//!
//! Endpoints:
//! - `GET    /health`, `GET /stats`
//! - `POST   /users`, `GET /users`, `GET|PUT|DELETE /users/{id}`
//! - `POST   /assets`, `GET /assets`, `GET|PUT|DELETE /assets/{id}`
//! - `GET    /assets/near?lat=..&lng=..`, `GET /assets/by-h3/{h3_index}`
//! - `POST   /incidents`, `GET /incidents`, `GET|PUT|DELETE /incidents/{id}`
//! - `GET    /incidents/near?lat=..&lng=..`, `GET /incidents/by-h3/{h3_index}`
//! - `GET    /assets/by-cell/{cell}`, `GET /incidents/by-cell/{cell}` (aliases of `by-h3`)
//! - `GET    /analytics/region-summary`
//! - `GET    /audit/logs`
//!
//! # Example
//!
//! ```ignore
//! use cellwatch_server::run_server;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! run_server(listener, tracker, shutdown).await?;
//! ```

use crate::handler;
use axum::Router;
use axum::routing::get;
use cellwatch::Tracker;
use std::future::Future;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the application router around a tracker handle.
pub fn build_router(tracker: Tracker) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route("/stats", get(handler::stats))
        // Users
        .route("/users", get(handler::list_users).post(handler::create_user))
        .route(
            "/users/:id",
            get(handler::get_user)
                .put(handler::update_user)
                .delete(handler::delete_user),
        )
        // Assets
        .route(
            "/assets",
            get(handler::list_assets).post(handler::create_asset),
        )
        .route("/assets/near", get(handler::assets_near))
        .route("/assets/by-h3/:h3_index", get(handler::assets_by_cell))
        .route("/assets/by-cell/:h3_index", get(handler::assets_by_cell))
        .route(
            "/assets/:id",
            get(handler::get_asset)
                .put(handler::update_asset)
                .delete(handler::delete_asset),
        )
        // Incidents
        .route(
            "/incidents",
            get(handler::list_incidents).post(handler::create_incident),
        )
        .route("/incidents/near", get(handler::incidents_near))
        .route("/incidents/by-h3/:h3_index", get(handler::incidents_by_cell))
        .route("/incidents/by-cell/:h3_index", get(handler::incidents_by_cell))
        .route(
            "/incidents/:id",
            get(handler::get_incident)
                .put(handler::update_incident)
                .delete(handler::delete_incident),
        )
        // Analytics & audit
        .route("/analytics/region-summary", get(handler::region_summary))
        .route("/audit/logs", get(handler::audit_logs))
        .layer(TraceLayer::new_for_http())
        .with_state(tracker)
}

/// Run the HTTP server until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the listener address cannot be read or serving fails.
pub async fn run_server(
    listener: tokio::net::TcpListener,
    tracker: Tracker,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!(
        "Cellwatch HTTP server listening on {} (resolution {}, near ring {})",
        listener.local_addr()?,
        tracker.resolution(),
        tracker.config().near_ring_size
    );

    let app = build_router(tracker);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown signal received, stopping server...");
        })
        .await?;

    Ok(())
}
