use crate::web::models::{EntryResponse, ExitResponse, VehicleRequest};
use crate::web::{AppError, AppState};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use std::sync::Arc;

fn required_vehicle_number(payload: VehicleRequest) -> Result<String, AppError> {
    payload
        .vehicle_number
        .ok_or_else(|| AppError::InvalidInput("vehicle_number is required".to_string()))
}

async fn entry_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<Json<EntryResponse>, AppError> {
    let Json(payload) = payload?;
    let vehicle_number = required_vehicle_number(payload)?;

    let receipt = app_state.parking_service.record_entry(&vehicle_number).await?;
    Ok(Json(EntryResponse {
        message: format!(
            "Vehicle {} parked in slot {}",
            receipt.vehicle_number, receipt.slot_id
        ),
        slot_id: receipt.slot_id,
        entry_time: receipt.entry_time,
    }))
}

async fn exit_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<VehicleRequest>, JsonRejection>,
) -> Result<Json<ExitResponse>, AppError> {
    let Json(payload) = payload?;
    let vehicle_number = required_vehicle_number(payload)?;

    let receipt = app_state.parking_service.record_exit(&vehicle_number).await?;
    let message = if receipt.session_closed {
        format!(
            "Vehicle {} left slot {}",
            receipt.vehicle_number, receipt.slot_id
        )
    } else {
        format!(
            "Vehicle {} left slot {}, but no open session was found to close",
            receipt.vehicle_number, receipt.slot_id
        )
    };
    Ok(Json(ExitResponse {
        message,
        slot_id: receipt.slot_id,
        exit_time: receipt.exit_time,
        fee: receipt.fee,
        session_closed: receipt.session_closed,
    }))
}

pub fn parking_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/entry", post(entry_handler))
        .route("/api/exit", post(exit_handler))
}
