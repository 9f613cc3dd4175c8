use axum::{Router, http::Method, routing::get};
use sea_orm::DatabaseConnection;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::db::services::ParkingService;
use crate::server::config::ServerConfig;

pub use crate::web::error::AppError;
use crate::web::routes::*;

pub mod error;
pub mod models;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub parking_service: Arc<ParkingService>,
}

/// Serves the dashboard's static files. Unknown paths get `index.html` so the
/// front-end can do its own routing.
pub fn create_static_file_service(static_dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(static_dir).join("index.html");
    ServeDir::new(static_dir).fallback(ServeFile::new(index))
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(
    db_pool: DatabaseConnection,
    parking_service: Arc<ParkingService>,
    config: Arc<ServerConfig>,
) -> Router {
    let static_file_service = create_static_file_service(&config.static_dir);

    let app_state = Arc::new(AppState {
        db_pool,
        parking_service,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .merge(slot_routes::slot_router())
        .merge(parking_routes::parking_router())
        .merge(log_routes::log_router())
        .with_state(app_state)
        .fallback_service(static_file_service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
