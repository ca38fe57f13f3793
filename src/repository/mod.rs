//! Data access for the two halves of a station.
//!
//! Inventory and status rows are owned independently and addressed by the
//! same id. Neither repository looks at the other's table; merging happens in
//! [`crate::services::stations`].

mod inventory;
mod status;

pub use inventory::{InventoryRepository, NewInventory};
pub use status::StatusRepository;
