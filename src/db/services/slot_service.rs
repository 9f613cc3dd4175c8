use sea_orm::{
    prelude::Expr, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use crate::db::entities::slot;

/// Rows per INSERT while seeding; keeps us well under SQLite's bound-variable limit.
const SEED_CHUNK_SIZE: i32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancySummary {
    pub total: u64,
    pub occupied: u64,
    pub free: u64,
}

/// Inserts slots `1..=total_slots` if the table is empty. Returns how many rows were inserted.
pub async fn seed_slots<C: ConnectionTrait>(db: &C, total_slots: i32) -> Result<u64, DbErr> {
    if total_slots < 1 {
        return Err(DbErr::Custom(format!(
            "slot count must be at least 1, got {total_slots}"
        )));
    }
    if slot::Entity::find().count(db).await? > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    let mut start = 1;
    while start <= total_slots {
        let end = (start + SEED_CHUNK_SIZE - 1).min(total_slots);
        let rows = (start..=end).map(|id| slot::ActiveModel {
            id: Set(id),
            occupied: Set(false),
            vehicle_number: Set(None),
            entry_time: Set(None),
            exit_time: Set(None),
            fee: Set(0),
        });
        inserted += slot::Entity::insert_many(rows)
            .exec_without_returning(db)
            .await?;
        start = end + 1;
    }
    Ok(inserted)
}

/// Retrieves every slot ordered by id.
pub async fn get_all_slots<C: ConnectionTrait>(db: &C) -> Result<Vec<slot::Model>, DbErr> {
    slot::Entity::find()
        .order_by_asc(slot::Column::Id)
        .all(db)
        .await
}

/// The allocator: lowest-numbered unoccupied slot, or `None` when the lot is full.
pub async fn find_first_free_slot<C: ConnectionTrait>(
    db: &C,
) -> Result<Option<slot::Model>, DbErr> {
    slot::Entity::find()
        .filter(slot::Column::Occupied.eq(false))
        .order_by_asc(slot::Column::Id)
        .one(db)
        .await
}

/// Finds the occupied slot holding `vehicle_number`. Should several match, the lowest id wins.
pub async fn find_occupied_slot_by_vehicle<C: ConnectionTrait>(
    db: &C,
    vehicle_number: &str,
) -> Result<Option<slot::Model>, DbErr> {
    slot::Entity::find()
        .filter(slot::Column::Occupied.eq(true))
        .filter(slot::Column::VehicleNumber.eq(vehicle_number))
        .order_by_asc(slot::Column::Id)
        .one(db)
        .await
}

/// Free -> Occupied. Only touches the row if it is still free, so the caller can
/// detect a lost race through the returned row count.
pub async fn mark_occupied<C: ConnectionTrait>(
    db: &C,
    slot_id: i32,
    vehicle_number: &str,
    entry_time: i64,
) -> Result<u64, DbErr> {
    let result = slot::Entity::update_many()
        .col_expr(slot::Column::Occupied, Expr::value(true))
        .col_expr(
            slot::Column::VehicleNumber,
            Expr::value(Some(vehicle_number.to_owned())),
        )
        .col_expr(slot::Column::EntryTime, Expr::value(Some(entry_time)))
        .col_expr(slot::Column::ExitTime, Expr::value(Option::<i64>::None))
        .col_expr(slot::Column::Fee, Expr::value(0i64))
        .filter(slot::Column::Id.eq(slot_id))
        .filter(slot::Column::Occupied.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Occupied -> Free, recording the exit time and the fee charged.
/// Guarded on the slot still holding `vehicle_number`.
pub async fn mark_free<C: ConnectionTrait>(
    db: &C,
    slot_id: i32,
    vehicle_number: &str,
    exit_time: i64,
    fee: i64,
) -> Result<u64, DbErr> {
    let result = slot::Entity::update_many()
        .col_expr(slot::Column::Occupied, Expr::value(false))
        .col_expr(
            slot::Column::VehicleNumber,
            Expr::value(Option::<String>::None),
        )
        .col_expr(slot::Column::EntryTime, Expr::value(Option::<i64>::None))
        .col_expr(slot::Column::ExitTime, Expr::value(Some(exit_time)))
        .col_expr(slot::Column::Fee, Expr::value(fee))
        .filter(slot::Column::Id.eq(slot_id))
        .filter(slot::Column::Occupied.eq(true))
        .filter(slot::Column::VehicleNumber.eq(vehicle_number))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn get_occupancy_summary<C: ConnectionTrait>(db: &C) -> Result<OccupancySummary, DbErr> {
    let total = slot::Entity::find().count(db).await?;
    let occupied = slot::Entity::find()
        .filter(slot::Column::Occupied.eq(true))
        .count(db)
        .await?;
    Ok(OccupancySummary {
        total,
        occupied,
        free: total.saturating_sub(occupied),
    })
}
