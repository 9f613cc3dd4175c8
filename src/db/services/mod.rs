//! Data access for slots and parking sessions, plus the service that drives the
//! entry/exit state transitions on top of them. Query helpers take any
//! `ConnectionTrait` so they run the same inside or outside a transaction.

pub mod log_service;
pub mod parking_service;
pub mod slot_service;

pub use parking_service::{EntryReceipt, ExitReceipt, ParkingService};
pub use slot_service::OccupancySummary;
