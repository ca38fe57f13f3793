use askama::Template;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::common::AppState;
use crate::config::MAX_PAGE_SIZE;
use crate::error::AppError;
use crate::services::StationService;
use crate::validation::parse_station_id;

use super::templates::{ErrorTemplate, StationDetailTemplate, StationListTemplate};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed)
    pub page: Option<u64>,
    /// Rows per page, defaults to the configured page size
    pub per_page: Option<u64>,
}

/// An [`AppError`] rendered as an HTML page instead of JSON.
#[derive(Debug)]
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(e: AppError) -> Self {
        Self(e)
    }
}

impl From<askama::Error> for PageError {
    fn from(e: askama::Error) -> Self {
        Self(AppError::Template(e))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.public_parts();
        let page = ErrorTemplate {
            status: status.as_u16(),
            title: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message,
        };

        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Template error: {e}");
                (status, page.message).into_response()
            }
        }
    }
}

/// Station table, one page at a time.
pub async fn station_list_page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Html<String>, PageError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(state.config.stations_page_size);
    if page == 0 {
        return Err(AppError::BadRequest("page must be at least 1".to_string()).into());
    }
    if per_page == 0 || per_page > MAX_PAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "per_page must be between 1 and {MAX_PAGE_SIZE}"
        ))
        .into());
    }

    let stations = StationService::new(&*state.db).page(page, per_page).await?;
    let html = StationListTemplate::from(stations).render()?;
    Ok(Html(html))
}

/// Detail page for one station.
pub async fn station_detail_page(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_station_id(&station_id)?;
    let station = StationService::new(&*state.db).get(id).await?;
    let html = StationDetailTemplate { station }.render()?;
    Ok(Html(html))
}
