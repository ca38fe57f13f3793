use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    Json,
};
use serde_json::Value;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::services::{NewStation, StationService, StationView};
use crate::validation::{parse_station_id, validate_create_station, validate_status_update};

use super::types::{DeleteResponse, StatusUpdateRequest, StatusUpdateResponse};

/// List all stations
#[utoipa::path(
    get,
    path = "/stations",
    responses(
        (status = 200, description = "Stations retrieved successfully", body = Vec<StationView>),
        (status = 500, description = "Database error"),
    ),
    tag = "stations"
)]
pub async fn list_stations(State(state): State<AppState>) -> AppResult<Json<Vec<StationView>>> {
    let stations = StationService::new(&*state.db).list().await?;
    Ok(Json(stations))
}

/// Get a specific station by ID
#[utoipa::path(
    get,
    path = "/stations/{station_id}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    responses(
        (status = 200, description = "Station retrieved successfully", body = StationView),
        (status = 400, description = "Malformed station ID"),
        (status = 404, description = "Station not found"),
    ),
    tag = "stations"
)]
pub async fn get_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> AppResult<Json<StationView>> {
    let id = parse_station_id(&station_id)?;
    let station = StationService::new(&*state.db).get(id).await?;
    Ok(Json(station))
}

/// Register a station with its initial status
#[utoipa::path(
    post,
    path = "/stations",
    request_body = NewStation,
    responses(
        (status = 201, description = "Station created", body = StationView),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Invalid fields, listed per field"),
    ),
    tag = "stations"
)]
pub async fn create_station(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<StationView>)> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let new_station = validate_create_station(&body).map_err(AppError::Validation)?;

    let station = StationService::new(&*state.db).create(new_station).await?;
    let location = format!("/stations/{}", station.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(station),
    ))
}

/// Set a station's active/inactive status
#[utoipa::path(
    put,
    path = "/stations/{station_id}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status set (or already set)", body = StatusUpdateResponse),
        (status = 400, description = "Malformed ID, unexpected fields or invalid status"),
        (status = 404, description = "Station or its status record not found"),
    ),
    tag = "stations"
)]
pub async fn update_station_status(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<StatusUpdateResponse>> {
    let id = parse_station_id(&station_id)?;
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let status = validate_status_update(&body)?;

    let change = StationService::new(&*state.db)
        .update_status(id, status)
        .await?;

    Ok(Json(change.into()))
}

/// Delete a station's inventory and status records
#[utoipa::path(
    delete,
    path = "/stations/{station_id}",
    params(
        ("station_id" = i32, Path, description = "Station ID"),
    ),
    responses(
        (status = 200, description = "Station deleted", body = DeleteResponse),
        (status = 400, description = "Malformed station ID"),
        (status = 404, description = "Neither record exists"),
    ),
    tag = "stations"
)]
pub async fn delete_station(
    State(state): State<AppState>,
    Path(station_id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let id = parse_station_id(&station_id)?;
    let deletion = StationService::new(&*state.db).delete(id).await?;
    Ok(Json(deletion.into()))
}
