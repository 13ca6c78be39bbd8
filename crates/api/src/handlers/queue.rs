use crate::{dto::QueueStatsResponse, errors::ApiError, state::AppState};
use axum::{extract::State, Json};
use tracing::instrument;

#[instrument(skip(state), name = "api_get_queue_stats")]
pub async fn get_queue_stats(
    State(state): State<AppState>,
) -> Result<Json<QueueStatsResponse>, ApiError> {
    let stats = state.get_queue_stats.execute().await?;
    Ok(Json(stats.into()))
}
