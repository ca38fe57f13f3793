use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::services::{Deletion, StatusChange, StatusLabel};

/// Status update body. `status` is accepted as an alias of `estado`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// true/false or 1/0
    #[schema(value_type = i32, example = 1)]
    pub estado: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusUpdateResponse {
    pub message: String,
    pub id: i32,
    #[schema(value_type = String, example = "active")]
    pub estado: StatusLabel,
    /// False when the station already had the requested status
    pub changed: bool,
}

impl From<StatusChange> for StatusUpdateResponse {
    fn from(change: StatusChange) -> Self {
        let message = if change.written {
            format!("Station {} status changed to {}", change.id, change.current)
        } else {
            format!("Station {} status is already {}", change.id, change.current)
        };

        Self {
            message,
            id: change.id,
            estado: change.current,
            changed: change.written,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i32,
    pub inventory_deleted: bool,
    pub status_deleted: bool,
}

impl From<Deletion> for DeleteResponse {
    fn from(deletion: Deletion) -> Self {
        Self {
            message: format!("Station {} deleted", deletion.id),
            id: deletion.id,
            inventory_deleted: deletion.inventory_deleted,
            status_deleted: deletion.status_deleted,
        }
    }
}
