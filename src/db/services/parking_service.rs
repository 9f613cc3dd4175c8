use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::db::services::{log_service, slot_service};
use crate::services::billing_service;
use crate::services::clock::Clock;
use crate::web::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReceipt {
    pub vehicle_number: String,
    pub slot_id: i32,
    pub entry_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitReceipt {
    pub vehicle_number: String,
    pub slot_id: i32,
    pub exit_time: i64,
    pub fee: i64,
    /// False when the slot was freed but no open session row matched it.
    pub session_closed: bool,
}

/// Owns the entry/exit state transitions.
///
/// Every transition runs under `write_lock` and inside one store transaction,
/// so two entries can never be handed the same slot and the slot and log rows
/// commit together.
pub struct ParkingService {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    rate_per_hour: i64,
    write_lock: Mutex<()>,
}

impl ParkingService {
    pub fn new(db: DatabaseConnection, clock: Arc<dyn Clock>, rate_per_hour: i64) -> Self {
        Self {
            db,
            clock,
            rate_per_hour,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn record_entry(&self, vehicle_number: &str) -> Result<EntryReceipt, AppError> {
        let vehicle_number = normalize_vehicle_number(vehicle_number)?;

        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;

        if let Some(slot) =
            slot_service::find_occupied_slot_by_vehicle(&txn, &vehicle_number).await?
        {
            warn!(vehicle = %vehicle_number, slot_id = slot.id, "Entry rejected, vehicle already parked.");
            return Err(AppError::AlreadyParked(vehicle_number));
        }

        let slot = slot_service::find_first_free_slot(&txn)
            .await?
            .ok_or(AppError::NoFreeSlot)?;

        let entry_time = self.clock.now_millis();
        let rows_affected =
            slot_service::mark_occupied(&txn, slot.id, &vehicle_number, entry_time).await?;
        if rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "Slot {} was taken before it could be assigned",
                slot.id
            )));
        }

        log_service::open_log(&txn, &vehicle_number, slot.id, entry_time).await?;
        txn.commit().await?;

        info!(vehicle = %vehicle_number, slot_id = slot.id, entry_time, "Vehicle entered.");
        Ok(EntryReceipt {
            vehicle_number,
            slot_id: slot.id,
            entry_time,
        })
    }

    pub async fn record_exit(&self, vehicle_number: &str) -> Result<ExitReceipt, AppError> {
        let vehicle_number = normalize_vehicle_number(vehicle_number)?;

        let _guard = self.write_lock.lock().await;
        let txn = self.db.begin().await?;

        let slot = slot_service::find_occupied_slot_by_vehicle(&txn, &vehicle_number)
            .await?
            .ok_or_else(|| AppError::VehicleNotFound(vehicle_number.clone()))?;
        let entry_time = slot.entry_time.ok_or_else(|| {
            AppError::InternalServerError(format!(
                "Slot {} is occupied but has no entry time",
                slot.id
            ))
        })?;

        let exit_time = self.clock.now_millis();
        let fee = billing_service::calculate_fee(entry_time, exit_time, self.rate_per_hour);

        let rows_affected =
            slot_service::mark_free(&txn, slot.id, &vehicle_number, exit_time, fee).await?;
        if rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "Slot {} changed before the exit could be recorded",
                slot.id
            )));
        }

        let closed =
            log_service::close_open_log(&txn, slot.id, &vehicle_number, exit_time, fee).await?;
        if closed == 0 {
            warn!(
                vehicle = %vehicle_number,
                slot_id = slot.id,
                "No open session found for exiting vehicle; slot freed without a log update."
            );
        }
        txn.commit().await?;

        info!(vehicle = %vehicle_number, slot_id = slot.id, exit_time, fee, "Vehicle exited.");
        Ok(ExitReceipt {
            vehicle_number,
            slot_id: slot.id,
            exit_time,
            fee,
            session_closed: closed > 0,
        })
    }
}

fn normalize_vehicle_number(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "vehicle_number is required".to_string(),
        ));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_vehicle_numbers_are_rejected() {
        assert!(matches!(
            normalize_vehicle_number("   "),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            normalize_vehicle_number(""),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn surrounding_whitespace_is_stripped() {
        assert_eq!(normalize_vehicle_number("  ABC123 ").unwrap(), "ABC123");
    }
}
