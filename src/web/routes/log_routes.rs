use crate::db::entities::parking_log;
use crate::db::services::log_service::{self, RECENT_LOG_LIMIT};
use crate::web::{AppError, AppState};
use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

async fn get_logs_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<parking_log::Model>>, AppError> {
    let logs = log_service::get_recent_logs(&app_state.db_pool, RECENT_LOG_LIMIT).await?;
    Ok(Json(logs))
}

pub fn log_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/logs", get(get_logs_handler))
}
