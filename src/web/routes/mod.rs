pub mod log_routes;
pub mod parking_routes;
pub mod slot_routes;
