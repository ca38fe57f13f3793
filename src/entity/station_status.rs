use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Operational status of a station (`estacion_bd`).
///
/// The id is the inventory id, not a generated key. There is no foreign key
/// behind the relation: a status row may exist without its inventory row and
/// the other way round.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "estacion_bd")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    #[sea_orm(column_name = "estado")]
    pub status: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::station_inventory::Entity",
        from = "Column::Id",
        to = "super::station_inventory::Column::Id"
    )]
    Inventory,
}

impl Related<super::station_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
