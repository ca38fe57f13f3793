//! Askama templates for the server-rendered station pages.

use askama::Template;

use crate::services::{StationPage, StationView};

/// Paginated station table.
#[derive(Template)]
#[template(path = "stations/list.html")]
pub struct StationListTemplate {
    pub stations: Vec<StationView>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<StationPage> for StationListTemplate {
    fn from(page: StationPage) -> Self {
        Self {
            total_pages: page.total_pages(),
            has_previous: page.has_previous(),
            has_next: page.has_next(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            stations: page.stations,
        }
    }
}

/// Single station detail page.
#[derive(Template)]
#[template(path = "stations/detail.html")]
pub struct StationDetailTemplate {
    pub station: StationView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub status: u16,
    pub title: String,
    pub message: String,
}
