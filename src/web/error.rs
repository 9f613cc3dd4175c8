use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No free slots available")]
    NoFreeSlot,
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),
    #[error("Vehicle already parked: {0}")]
    AlreadyParked(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NoFreeSlot => (
                StatusCode::BAD_REQUEST,
                "No free slots available".to_string(),
            ),
            AppError::VehicleNotFound(vehicle) => (
                StatusCode::BAD_REQUEST,
                format!("Vehicle {vehicle} is not parked in any slot"),
            ),
            AppError::AlreadyParked(vehicle) => (
                StatusCode::BAD_REQUEST,
                format!("Vehicle {vehicle} is already parked"),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(msg) => {
                error!(error = %msg, "Storage failure while handling request.");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::InternalServerError(msg) => {
                error!(error = %msg, "Internal error while handling request.");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        for err in [
            AppError::InvalidInput("vehicle_number is required".into()),
            AppError::NoFreeSlot,
            AppError::VehicleNotFound("ABC123".into()),
            AppError::AlreadyParked("ABC123".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn storage_errors_map_to_internal_server_error() {
        let err: AppError = sea_orm::DbErr::Custom("disk I/O error".into()).into();
        assert!(matches!(err, AppError::DatabaseError(ref m) if m.contains("disk I/O error")));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn lost_race_maps_to_conflict() {
        let err = AppError::Conflict("slot 3 changed".into());
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
