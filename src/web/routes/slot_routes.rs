use crate::db::entities::slot;
use crate::db::services::slot_service::{self, OccupancySummary};
use crate::web::{AppError, AppState};
use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

async fn get_slots_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<slot::Model>>, AppError> {
    let slots = slot_service::get_all_slots(&app_state.db_pool).await?;
    Ok(Json(slots))
}

async fn get_summary_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<OccupancySummary>, AppError> {
    let summary = slot_service::get_occupancy_summary(&app_state.db_pool).await?;
    Ok(Json(summary))
}

pub fn slot_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/slots", get(get_slots_handler))
        .route("/api/summary", get(get_summary_handler))
}
