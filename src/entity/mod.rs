pub mod station_inventory;
pub mod station_status;
