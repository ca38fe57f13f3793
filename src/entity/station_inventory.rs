use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Static identity and location of a station (`estacion_inv`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "estacion_inv")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    pub idema: String,
    #[sea_orm(column_name = "provincia")]
    pub province: String,
    #[sea_orm(column_name = "latitud")]
    pub latitude: f64,
    #[sea_orm(column_name = "longitud")]
    pub longitude: f64,
    #[sea_orm(column_name = "altitud")]
    pub altitude: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::station_status::Entity")]
    Status,
}

impl Related<super::station_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Status.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
