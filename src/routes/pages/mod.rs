mod handlers;
mod templates;

pub use handlers::{station_detail_page, station_list_page, PageError, PageQuery};
pub use templates::{ErrorTemplate, StationDetailTemplate, StationListTemplate};
