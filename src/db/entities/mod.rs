pub mod parking_log;
pub mod slot;
