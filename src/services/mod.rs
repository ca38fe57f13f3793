pub mod stations;
pub mod view;

pub use stations::{Deletion, NewStation, StationPage, StationService, StatusChange};
pub use view::{derive_status_label, StationView, StatusLabel};
