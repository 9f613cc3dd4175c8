pub mod billing_service;
pub mod clock;
