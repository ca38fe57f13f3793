use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    ModelTrait, QueryFilter, Set,
};
use std::collections::HashMap;

use crate::entity::{station_inventory, station_status};

pub struct StatusRepository<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> StatusRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Every status row, keyed by station id.
    pub async fn all_by_id(&self) -> Result<HashMap<i32, station_status::Model>, DbErr> {
        let rows = station_status::Entity::find().all(self.conn).await?;
        Ok(rows.into_iter().map(|s| (s.id, s)).collect())
    }

    /// Status rows for the given station ids, keyed by id. Ids without a row
    /// are simply absent from the map.
    pub async fn by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, station_status::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = station_status::Entity::find()
            .filter(station_status::Column::Id.is_in(ids.iter().copied()))
            .all(self.conn)
            .await?;
        Ok(rows.into_iter().map(|s| (s.id, s)).collect())
    }

    pub async fn find(&self, id: i32) -> Result<Option<station_status::Model>, DbErr> {
        station_status::Entity::find_by_id(id).one(self.conn).await
    }

    /// Status row sharing the inventory row's id, if any.
    pub async fn for_inventory(
        &self,
        inventory: &station_inventory::Model,
    ) -> Result<Option<station_status::Model>, DbErr> {
        inventory
            .find_related(station_status::Entity)
            .one(self.conn)
            .await
    }

    /// Insert a status row under an existing inventory id.
    pub async fn insert(&self, id: i32, status: Option<i32>) -> Result<station_status::Model, DbErr> {
        station_status::ActiveModel {
            id: Set(id),
            status: Set(status),
        }
        .insert(self.conn)
        .await
    }

    /// Overwrite the stored status. Returns whether a row was updated.
    pub async fn set_status(&self, id: i32, status: i32) -> Result<bool, DbErr> {
        let result = station_status::Entity::update_many()
            .col_expr(station_status::Column::Status, Expr::value(status))
            .filter(station_status::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = station_status::Entity::delete_by_id(id)
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
