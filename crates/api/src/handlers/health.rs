use crate::{dto::HealthResponse, errors::ApiError, state::AppState};
use axum::{extract::State, Json};

pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let domains_tracked = state.get_domain_record.count().await?;
    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        hostname,
        domains_tracked,
    }))
}
