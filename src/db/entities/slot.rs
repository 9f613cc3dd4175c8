use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "slots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)] // ids are seeded 1..N, never generated
    pub id: i32,
    pub occupied: bool,
    pub vehicle_number: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub entry_time: Option<i64>,
    pub exit_time: Option<i64>,
    pub fee: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::parking_log::Entity")]
    ParkingLogs,
}

impl Related<super::parking_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
