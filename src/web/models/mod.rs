use serde::{Deserialize, Serialize};

/// Body of both `/api/entry` and `/api/exit`. The field is optional here so a
/// missing plate becomes a validation error rather than a JSON rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VehicleRequest {
    pub vehicle_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub message: String,
    pub slot_id: i32,
    pub entry_time: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExitResponse {
    pub message: String,
    pub slot_id: i32,
    pub exit_time: i64,
    pub fee: i64,
    /// False when the slot was freed but its session row could not be closed.
    pub session_closed: bool,
}
