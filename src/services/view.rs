//! The merged, client-facing shape of a station.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use utoipa::ToSchema;

use crate::entity::{station_inventory, station_status};

/// Status label shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Active,
    Inactive,
    /// A stored value other than 0/1, passed through as-is.
    Other(i32),
}

/// Label for a stored status column value.
///
/// A missing status row is treated the same as a NULL column.
#[must_use]
pub fn derive_status_label(stored: Option<i32>) -> StatusLabel {
    match stored {
        None | Some(0) => StatusLabel::Inactive,
        Some(1) => StatusLabel::Active,
        Some(other) => StatusLabel::Other(other),
    }
}

impl StatusLabel {
    #[must_use]
    pub fn as_str(&self) -> Cow<'static, str> {
        match self {
            Self::Active => Cow::Borrowed("active"),
            Self::Inactive => Cow::Borrowed("inactive"),
            Self::Other(v) => Cow::Owned(v.to_string()),
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

/// Inventory fields merged with the derived status label.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StationView {
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "provincia")]
    pub province: String,
    pub idema: String,
    /// Latitude
    #[serde(rename = "x")]
    pub latitude: f64,
    /// Longitude
    #[serde(rename = "y")]
    pub longitude: f64,
    #[serde(rename = "altitud")]
    pub altitude: i32,
    /// "active", "inactive", or the raw stored value
    #[serde(rename = "estado")]
    #[schema(value_type = String, example = "active")]
    pub status: StatusLabel,
}

impl StationView {
    /// Merge an inventory row with the status row sharing its id, if any.
    #[must_use]
    pub fn merge(
        inventory: station_inventory::Model,
        status: Option<&station_status::Model>,
    ) -> Self {
        Self {
            id: inventory.id,
            name: inventory.name,
            province: inventory.province,
            idema: inventory.idema,
            latitude: inventory.latitude,
            longitude: inventory.longitude,
            altitude: inventory.altitude,
            status: derive_status_label(status.and_then(|s| s.status)),
        }
    }
}
