use sea_orm::{
    prelude::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::db::entities::parking_log;

/// How many sessions the dashboard's log view returns.
pub const RECENT_LOG_LIMIT: u64 = 200;

/// Opens a session row for a vehicle that just entered `slot_id`.
pub async fn open_log<C: ConnectionTrait>(
    db: &C,
    vehicle_number: &str,
    slot_id: i32,
    entry_time: i64,
) -> Result<parking_log::Model, DbErr> {
    let new_log = parking_log::ActiveModel {
        vehicle_number: Set(vehicle_number.to_owned()),
        slot_id: Set(slot_id),
        entry_time: Set(entry_time),
        exit_time: Set(None),
        fee: Set(None),
        ..Default::default() // id is assigned by the store
    };
    new_log.insert(db).await
}

/// Closes the open session for (`slot_id`, `vehicle_number`). Returns the number of
/// rows closed; zero means no open session existed.
pub async fn close_open_log<C: ConnectionTrait>(
    db: &C,
    slot_id: i32,
    vehicle_number: &str,
    exit_time: i64,
    fee: i64,
) -> Result<u64, DbErr> {
    let result = parking_log::Entity::update_many()
        .col_expr(parking_log::Column::ExitTime, Expr::value(Some(exit_time)))
        .col_expr(parking_log::Column::Fee, Expr::value(Some(fee)))
        .filter(parking_log::Column::SlotId.eq(slot_id))
        .filter(parking_log::Column::VehicleNumber.eq(vehicle_number))
        .filter(parking_log::Column::ExitTime.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Most recent sessions first, capped at `limit`.
pub async fn get_recent_logs<C: ConnectionTrait>(
    db: &C,
    limit: u64,
) -> Result<Vec<parking_log::Model>, DbErr> {
    parking_log::Entity::find()
        .order_by_desc(parking_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Sessions still waiting for an exit, oldest first.
pub async fn get_open_logs_for_vehicle<C: ConnectionTrait>(
    db: &C,
    vehicle_number: &str,
) -> Result<Vec<parking_log::Model>, DbErr> {
    parking_log::Entity::find()
        .filter(parking_log::Column::VehicleNumber.eq(vehicle_number))
        .filter(parking_log::Column::ExitTime.is_null())
        .order_by_asc(parking_log::Column::Id)
        .all(db)
        .await
}
