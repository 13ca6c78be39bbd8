use crate::{
    dto::{LookupQuery, LookupResponse},
    errors::ApiError,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use ipwatch_domain::DomainError;
use tracing::{debug, instrument};

/// Domains whose current IPv4 is `ip`. Plain text, one domain per line,
/// unless `?json=true` asks for `{domains, count}`.
#[instrument(skip(state, query), name = "api_lookup_domains_by_ip")]
pub async fn lookup_domains_by_ip(
    State(state): State<AppState>,
    Path(ip): Path<String>,
    Query(query): Query<LookupQuery>,
) -> Result<Response, ApiError> {
    let domains = state.get_domains_by_ip.execute(&ip).await?;
    debug!(count = domains.len(), "Lookup completed");

    if query.wants_json() {
        let count = domains.len();
        return Ok(Json(LookupResponse { domains, count }).into_response());
    }

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        domains.join("\n"),
    )
        .into_response())
}

pub async fn lookup_without_ip() -> ApiError {
    ApiError(DomainError::InvalidIpAddress(String::new()))
}
