//! Station operations over the inventory and status repositories.

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::repository::{InventoryRepository, NewInventory, StatusRepository};

use super::view::{derive_status_label, StationView, StatusLabel};

/// A validated station registration, as sent by clients.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct NewStation {
    #[serde(rename = "nombre")]
    #[schema(max_length = 100)]
    pub name: String,
    #[schema(max_length = 10)]
    pub idema: String,
    #[serde(rename = "provincia")]
    #[schema(max_length = 50)]
    pub province: String,
    /// Latitude
    #[serde(rename = "x")]
    pub latitude: f64,
    /// Longitude
    #[serde(rename = "y")]
    pub longitude: f64,
    #[serde(rename = "altitud")]
    pub altitude: i32,
    /// Initial status: 0 (inactive) or 1 (active)
    #[serde(rename = "estado")]
    pub status: i32,
}

impl NewStation {
    fn inventory(&self) -> NewInventory {
        NewInventory {
            name: self.name.clone(),
            idema: self.idema.clone(),
            province: self.province.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
        }
    }
}

/// One page of the station list.
#[derive(Debug, Clone)]
pub struct StationPage {
    pub stations: Vec<StationView>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl StationPage {
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// Outcome of a status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub id: i32,
    pub previous: StatusLabel,
    pub current: StatusLabel,
    /// False when the stored value already matched and nothing was written.
    pub written: bool,
}

/// Which halves of a station a delete removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deletion {
    pub id: i32,
    pub inventory_deleted: bool,
    pub status_deleted: bool,
}

pub struct StationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All stations in id order, each merged with its status.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<StationView>> {
        let inventory = InventoryRepository::new(self.db).all().await?;
        let statuses = StatusRepository::new(self.db).all_by_id().await?;

        tracing::debug!(
            stations = inventory.len(),
            status_rows = statuses.len(),
            "stations_listed"
        );

        Ok(inventory
            .into_iter()
            .map(|s| {
                let status = statuses.get(&s.id);
                StationView::merge(s, status)
            })
            .collect())
    }

    /// One page of stations (1-indexed) in id order.
    ///
    /// # Errors
    ///
    /// `AppError::BadRequest` when `page` or `per_page` is zero, or the page
    /// starts past the largest offset the database accepts.
    #[tracing::instrument(skip(self))]
    pub async fn page(&self, page: u64, per_page: u64) -> AppResult<StationPage> {
        let offset = page_offset(page, per_page)?;
        let (inventory, total) = InventoryRepository::new(self.db)
            .range(offset, per_page)
            .await?;
        let ids: Vec<i32> = inventory.iter().map(|s| s.id).collect();
        let statuses = StatusRepository::new(self.db).by_ids(&ids).await?;

        let stations = inventory
            .into_iter()
            .map(|s| {
                let status = statuses.get(&s.id);
                StationView::merge(s, status)
            })
            .collect();

        Ok(StationPage {
            stations,
            page,
            per_page,
            total,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i32) -> AppResult<StationView> {
        let inventory = InventoryRepository::new(self.db)
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Station {id} not found")))?;
        let status = StatusRepository::new(self.db)
            .for_inventory(&inventory)
            .await?;

        Ok(StationView::merge(inventory, status.as_ref()))
    }

    /// Insert the inventory row, then a status row under the generated id.
    /// Both inserts commit together.
    #[tracing::instrument(skip(self, new), fields(idema = %new.idema))]
    pub async fn create(&self, new: NewStation) -> AppResult<StationView> {
        let txn = self.db.begin().await?;

        let inventory = InventoryRepository::new(&txn).insert(new.inventory()).await?;
        let status = StatusRepository::new(&txn)
            .insert(inventory.id, Some(new.status))
            .await?;

        txn.commit().await?;

        tracing::info!(
            station_id = inventory.id,
            status = new.status,
            "station_created"
        );

        Ok(StationView::merge(inventory, Some(&status)))
    }

    /// Set the stored status. A missing status row is not created here.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: i32, status: i32) -> AppResult<StatusChange> {
        let statuses = StatusRepository::new(self.db);

        let Some(current) = statuses.find(id).await? else {
            let exists = InventoryRepository::new(self.db).find(id).await?.is_some();
            let message = if exists {
                format!("Station {id} has no status record")
            } else {
                format!("Station {id} not found")
            };
            return Err(AppError::NotFound(message));
        };

        let previous = derive_status_label(current.status);
        let requested = derive_status_label(Some(status));

        if current.status == Some(status) {
            tracing::debug!(station_id = id, status, "station_status_unchanged");
            return Ok(StatusChange {
                id,
                previous,
                current: requested,
                written: false,
            });
        }

        if !statuses.set_status(id, status).await? {
            return Err(AppError::NotFound(format!(
                "Station {id} has no status record"
            )));
        }

        tracing::info!(
            station_id = id,
            from = %previous,
            to = %requested,
            "station_status_updated"
        );

        Ok(StatusChange {
            id,
            previous,
            current: requested,
            written: true,
        })
    }

    /// Remove whichever of the two rows exist. Fails only when neither did.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> AppResult<Deletion> {
        let txn = self.db.begin().await?;

        let status_deleted = StatusRepository::new(&txn).delete(id).await?;
        let inventory_deleted = InventoryRepository::new(&txn).delete(id).await?;

        if !status_deleted && !inventory_deleted {
            return Err(AppError::NotFound(format!("Station {id} not found")));
        }

        txn.commit().await?;

        tracing::info!(
            station_id = id,
            inventory_deleted,
            status_deleted,
            "station_deleted"
        );

        Ok(Deletion {
            id,
            inventory_deleted,
            status_deleted,
        })
    }
}

/// Row offset of a 1-indexed page, bounded by the signed 64-bit range SQL
/// offsets use.
fn page_offset(page: u64, per_page: u64) -> AppResult<u64> {
    if page == 0 || per_page == 0 {
        return Err(AppError::BadRequest(
            "page and per_page must be at least 1".to_string(),
        ));
    }

    (page - 1)
        .checked_mul(per_page)
        .filter(|offset| i64::try_from(*offset).is_ok())
        .ok_or_else(|| AppError::BadRequest(format!("page {page} is out of range")))
}
