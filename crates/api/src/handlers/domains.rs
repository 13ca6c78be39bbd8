use crate::{dto::DomainRecordResponse, errors::ApiError, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

#[instrument(skip(state), name = "api_get_domain_record")]
pub async fn get_domain_record(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DomainRecordResponse>, ApiError> {
    let record = state.get_domain_record.execute(&name).await?;
    Ok(Json(record.into()))
}
