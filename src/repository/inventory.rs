use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use crate::entity::station_inventory;

/// Inventory fields supplied when registering a station.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventory {
    pub name: String,
    pub idema: String,
    pub province: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: i32,
}

pub struct InventoryRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> InventoryRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Every inventory row in primary-key order.
    pub async fn all(&self) -> Result<Vec<station_inventory::Model>, DbErr> {
        station_inventory::Entity::find()
            .order_by_asc(station_inventory::Column::Id)
            .all(self.conn)
            .await
    }

    /// Up to `limit` rows in primary-key order starting at `offset`, and the
    /// total row count.
    pub async fn range(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<station_inventory::Model>, u64), DbErr> {
        let total = station_inventory::Entity::find().count(self.conn).await?;

        let rows = station_inventory::Entity::find()
            .order_by_asc(station_inventory::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.conn)
            .await?;

        Ok((rows, total))
    }

    pub async fn find(&self, id: i32) -> Result<Option<station_inventory::Model>, DbErr> {
        station_inventory::Entity::find_by_id(id).one(self.conn).await
    }

    /// Insert a row and return it with its generated id.
    pub async fn insert(&self, new: NewInventory) -> Result<station_inventory::Model, DbErr> {
        station_inventory::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            idema: Set(new.idema),
            province: Set(new.province),
            latitude: Set(new.latitude),
            longitude: Set(new.longitude),
            altitude: Set(new.altitude),
        }
        .insert(self.conn)
        .await
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = station_inventory::Entity::delete_by_id(id)
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
