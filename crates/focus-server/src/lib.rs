//! # focus-server
//!
//! HTTP API for the Focus task backend, built on axum.
//!
//! | Method | Path                    | Operation                          |
//! |--------|-------------------------|------------------------------------|
//! | POST   | `/task`                 | create (201)                       |
//! | GET    | `/task/{id}`            | fetch by id                        |
//! | PUT    | `/task/{id}`            | partial update                     |
//! | DELETE | `/task/{id}`            | soft delete                        |
//! | POST   | `/task/{id}/complete`   | move to done, stamp `completedAt`  |
//! | POST   | `/task/{id}/activate`   | move to active                     |
//! | GET    | `/tasks/{section}`      | list a section                     |
//! | GET    | `/health`               | liveness probe                     |
//!
//! CORS is permissive: the web client is served from a different origin.

pub mod error;
pub mod routes;
pub mod state;

use std::future::Future;
use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use state::AppState;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/task", post(routes::task::create))
        .route(
            "/task/{id}",
            get(routes::task::get)
                .put(routes::task::update)
                .delete(routes::task::delete),
        )
        .route("/task/{id}/complete", post(routes::task::complete))
        .route("/task/{id}/activate", post(routes::task::activate))
        .route("/tasks/{section}", get(routes::tasks::list))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the accept loop.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "request"
    );
    response
}
