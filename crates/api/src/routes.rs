use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Management endpoints, mounted under `/api` by the server.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/domains/{name}", get(handlers::get_domain_record))
        .route("/queue/stats", get(handlers::get_queue_stats))
        .with_state(state)
}

/// The reverse lookup endpoint, `GET /{ip}`. A bare `GET /` carries no
/// address and is rejected like any other malformed one.
pub fn create_lookup_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::lookup_without_ip))
        .route("/{ip}", get(handlers::lookup_domains_by_ip))
        .with_state(state)
}
